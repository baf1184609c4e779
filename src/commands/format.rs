use crate::FormatContext;
use crate::engine::EngineError;
use crate::output;
use anyhow::Result;

/// Formats every collected file in place.
///
/// When any file fails to read or format nothing is written and the
/// [`FormatErrors`](crate::engine::FormatErrors) aggregate is returned as the
/// error.
///
/// # Errors
///
/// Returns an error if collection, formatter construction, formatting or
/// writing fails.
pub fn execute(ctx: &FormatContext) -> Result<()> {
    let paths = super::collect(ctx)?;
    if paths.is_empty() {
        return Ok(());
    }

    let engine = ctx.engine()?;
    match engine.format(&paths) {
        Ok(0) => output::info("All files already formatted"),
        Ok(written) => {
            let noun = if written == 1 { "file" } else { "files" };
            output::success(&format!("Formatted {written} {noun}"));
        }
        Err(EngineError::Format(errors)) => return Err(errors.into()),
        Err(EngineError::Apply(e)) => return Err(e.context("Failed to apply formatting changes")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::FormatErrors;
    use tempfile::TempDir;

    fn context_for(dir: &std::path::Path) -> FormatContext {
        FormatContext::from_config(Config {
            include: vec![dir.display().to_string()],
            ..Config::default()
        })
    }

    #[test]
    fn test_formats_collected_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.yaml"), "key: value   \n\n\n").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "left   \n").unwrap();

        execute(&context_for(temp.path())).unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("a.yaml")).unwrap(),
            "key: value\n"
        );
        assert_eq!(
            std::fs::read_to_string(temp.path().join("notes.txt")).unwrap(),
            "left   \n"
        );
    }

    #[test]
    fn test_failure_returns_aggregate_and_writes_nothing() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.yaml"), "key: value   \n").unwrap();
        std::fs::write(temp.path().join("b.yaml"), [0xff, 0xfe]).unwrap();

        let err = execute(&context_for(temp.path())).unwrap_err();

        let errors = err.downcast_ref::<FormatErrors>().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors.paths()[0].ends_with("b.yaml"));
        assert_eq!(
            std::fs::read_to_string(temp.path().join("a.yaml")).unwrap(),
            "key: value   \n"
        );
    }
}
