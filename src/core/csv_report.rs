use crate::utils::error::{ReportError, Result};

pub const CSV_HEADER: [&str; 2] = ["name", "skills"];

/// Serializes `(name, skills)` lines behind a `name,skills` header. Quoting
/// follows RFC 4180: fields holding commas, quotes or newlines are wrapped in
/// double quotes and embedded quotes are doubled.
pub fn render_csv(lines: &[(String, String)]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for (name, skills) in lines {
        writer.write_record([name.as_str(), skills.as_str()])?;
    }

    writer
        .into_inner()
        .map_err(|e| ReportError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, skills: &str) -> (String, String) {
        (name.to_string(), skills.to_string())
    }

    fn render(lines: &[(String, String)]) -> String {
        String::from_utf8(render_csv(lines).unwrap()).unwrap()
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(render(&[]), "name,skills\n");
    }

    #[test]
    fn test_joined_skills_are_quoted() {
        let out = render(&[line("Ann", "Go (Expert), SQL (Beginner)")]);
        assert_eq!(out, "name,skills\nAnn,\"Go (Expert), SQL (Beginner)\"\n");
    }

    #[test]
    fn test_single_skill_is_not_quoted() {
        let out = render(&[line("Bob", "Rust (Proficient)")]);
        assert_eq!(out, "name,skills\nBob,Rust (Proficient)\n");
    }

    #[test]
    fn test_quotes_and_newlines_are_escaped() {
        let out = render(&[line("Ann \"Hacker\" Lee", "C (Expert)\nC++ (Beginner)")]);
        assert_eq!(
            out,
            "name,skills\n\"Ann \"\"Hacker\"\" Lee\",\"C (Expert)\nC++ (Beginner)\"\n"
        );

        // 用 csv reader 讀回，確認內容不變
        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "Ann \"Hacker\" Lee");
        assert_eq!(&record[1], "C (Expert)\nC++ (Beginner)");
    }
}
