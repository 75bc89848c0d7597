use anyhow::{Context, Result, bail};
use finder_scrape::Contents;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Write every record to `<dir>/<path>.yml`, replacing existing files.
///
/// Returns the written file paths in key order. Nothing is written when any
/// key would land outside `dir`.
pub fn write_contents(dir: &Path, contents: &Contents) -> Result<Vec<PathBuf>> {
    let targets = contents
        .keys()
        .map(|path| record_file(dir, path))
        .collect::<Result<Vec<_>>>()?;

    let mut written = Vec::with_capacity(contents.len());
    for ((path, record), target) in contents.iter().zip(targets) {
        let yaml = serde_yaml::to_string(record)
            .with_context(|| format!("encoding record {path:?}"))?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        fs::write(&target, yaml).with_context(|| format!("writing {}", target.display()))?;

        tracing::info!(
            target: "importer",
            record = %path,
            file = %target.display(),
            "importer.record.written"
        );
        written.push(target);
    }
    Ok(written)
}

/// `<dir>/<path>.yml`; `path` may name subdirectories but never leave `dir`.
fn record_file(dir: &Path, path: &str) -> Result<PathBuf> {
    let relative = Path::new(path);
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if path.trim().is_empty() || !contained {
        bail!("record path {path:?} is not inside the output directory");
    }
    Ok(dir.join(format!("{path}.yml")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use finder_scrape::Content;
    use std::time::Duration;

    fn slevin() -> Content {
        let mut record = Content::new(
            "Lucky Number Slevin",
            "https://en.wikipedia.org/wiki/Lucky Number Slevin",
        );
        record.directors = Some(vec!["Paul McGuigan".into()]);
        record.length = Some(Duration::from_secs(110 * 60));
        record
    }

    #[test]
    fn writes_one_file_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut contents = Contents::new();
        contents.insert("Lucky Number Slevin".into(), slevin());

        let written = write_contents(dir.path(), &contents).unwrap();
        assert_eq!(written, vec![dir.path().join("Lucky Number Slevin.yml")]);

        let text = fs::read_to_string(&written[0]).unwrap();
        assert!(text.contains("name: Lucky Number Slevin"));
        assert!(text.contains("length: 1h50m0s"));
        assert!(!text.contains("producers"));

        let back: Content = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, slevin());
    }

    #[test]
    fn overwrites_existing_record() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Lucky Number Slevin.yml");
        fs::write(&target, "stale: true\n").unwrap();

        let mut contents = Contents::new();
        contents.insert("Lucky Number Slevin".into(), slevin());
        write_contents(dir.path(), &contents).unwrap();

        let text = fs::read_to_string(&target).unwrap();
        assert!(!text.contains("stale"));
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("info").join("films");
        let mut contents = Contents::new();
        contents.insert("Memento".into(), Content::new("Memento", "https://en.wikipedia.org/wiki/Memento"));

        let written = write_contents(&nested, &contents).unwrap();
        assert!(written[0].is_file());
    }

    #[test]
    fn empty_contents_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_contents(dir.path(), &Contents::new()).unwrap();
        assert!(written.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn subject_with_subdirectory_stays_under_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut contents = Contents::new();
        contents.insert("AC/DC".into(), Content::new("AC/DC", "https://en.wikipedia.org/wiki/AC/DC"));

        let written = write_contents(dir.path(), &contents).unwrap();
        assert_eq!(written, vec![dir.path().join("AC").join("DC.yml")]);
        assert!(written[0].starts_with(dir.path()));
    }

    #[test]
    fn absolute_subject_is_rejected() {
        let info = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let subject = elsewhere.path().join("Escaped").display().to_string();
        let mut contents = Contents::new();
        contents.insert(subject.clone(), Content::new(&subject, "x"));

        let err = write_contents(info.path(), &contents).unwrap_err();
        assert!(err.to_string().contains("not inside the output directory"));
        assert!(!elsewhere.path().join("Escaped.yml").exists());
        assert_eq!(fs::read_dir(info.path()).unwrap().count(), 0);
    }

    #[test]
    fn parent_traversal_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let info = root.path().join("info");
        let mut contents = Contents::new();
        contents.insert("Memento".into(), Content::new("Memento", "x"));
        contents.insert("../Escaped".into(), Content::new("../Escaped", "x"));

        assert!(write_contents(&info, &contents).is_err());
        assert!(!root.path().join("Escaped.yml").exists());
        assert!(!info.join("Memento.yml").exists());
    }

    #[test]
    fn blank_subject_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut contents = Contents::new();
        contents.insert("  ".into(), Content::new("  ", "x"));
        assert!(write_contents(dir.path(), &contents).is_err());
    }
}
