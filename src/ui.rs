//! Terminal output and prompts.

use std::io;
use std::time::Duration;

use console::{
    Term,
    style,
};
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use js_i18n_sync::catalog::PersistReport;
use js_i18n_sync::diff::AuditReport;
use js_i18n_sync::locale::LocaleResolver;
use js_i18n_sync::patch::PatchReport;
use js_i18n_sync::translate::TranslationRun;

/// Console the run talks to. Messages and prompts use stdout, errors stderr.
#[derive(Debug, Clone)]
pub(crate) struct Console {
    term: Term,
    errors: Term,
}

impl Console {
    pub(crate) fn stdout() -> Self {
        Self { term: Term::stdout(), errors: Term::stderr() }
    }

    pub(crate) fn catalogs(&self, names: &[&str], reference: &str) -> io::Result<()> {
        self.term.write_line(&format!("{} languages found: {}", names.len(), names.join(", ")))?;
        self.term.write_line(&format!("Using: '{}' as reference", style(reference).bold()))
    }

    pub(crate) fn audit(&self, report: &AuditReport) -> io::Result<()> {
        for audit in report.incomplete() {
            self.term.write_line(
                &style(format!("Missing messages in '{}'", audit.locale)).red().to_string(),
            )?;
            for message in &audit.missing {
                self.term.write_line(&format!("  {}", style(&message.key).cyan()))?;
            }
        }
        if report.is_clean() {
            self.term.write_line(&style("Translations are ok 👌").green().to_string())?;
        }
        Ok(())
    }

    /// Ask a yes/no question. Anything but `y`/`yes` is a no.
    pub(crate) fn confirm(&self, question: &str, assume_yes: bool) -> io::Result<bool> {
        self.term.write_line("")?;
        if assume_yes {
            self.term.write_line(&format!("{question} (y/N) y"))?;
            return Ok(true);
        }
        self.term.write_str(&format!("{question} (y/N) "))?;
        let answer = self.term.read_line()?;
        Ok(is_yes(&answer))
    }

    pub(crate) fn spinner(&self, total: usize) -> ProgressBar {
        let progress = ProgressBar::new_spinner();
        let template = ProgressStyle::default_spinner().template("{spinner:.green} {msg}");
        if let Ok(spinner_style) = template {
            progress.set_style(spinner_style);
        }
        progress.set_message(format!("Translating 0/{total} messages..."));
        progress.enable_steady_tick(Duration::from_millis(100));
        progress
    }

    pub(crate) fn translations(
        &self,
        run: &TranslationRun,
        resolver: &LocaleResolver,
    ) -> io::Result<()> {
        if run.interrupted {
            self.term.write_line(
                &style("Translation interrupted, keeping finished messages").yellow().to_string(),
            )?;
        } else {
            self.term.write_line("Translations done ✅")?;
        }
        self.term.write_line("")?;

        for result in &run.results {
            self.term.write_line(&format!(
                "[{}] {} => {}",
                style(resolver.resolve(&result.locale)).green(),
                style(&result.key).cyan(),
                result.value
            ))?;
        }
        for failure in &run.failures {
            self.term.write_line(
                &style(format!("[{}] {} failed: {}", failure.locale, failure.key, failure.error))
                    .red()
                    .to_string(),
            )?;
        }
        Ok(())
    }

    pub(crate) fn patched(&self, patch: &PatchReport, persist: &PersistReport) -> io::Result<()> {
        for skipped in &patch.skipped {
            self.term.write_line(
                &style(format!(
                    "Skipped [{}] {}: {}",
                    skipped.translation.locale, skipped.translation.key, skipped.reason
                ))
                .yellow()
                .to_string(),
            )?;
        }
        for path in &persist.written {
            self.term.write_line(&format!("Patched {}", path.display()))?;
        }
        for error in &persist.failed {
            self.error(&error.to_string())?;
        }
        if persist.is_success() {
            self.term.write_line("Done ✅")?;
        }
        Ok(())
    }

    pub(crate) fn line(&self, message: &str) -> io::Result<()> {
        self.term.write_line(message)
    }

    pub(crate) fn error(&self, message: &str) -> io::Result<()> {
        self.errors.write_line(&style(message).red().to_string())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("y", true)]
    #[case(" Yes ", true)]
    #[case("", false)]
    #[case("n", false)]
    #[case("yep", false)]
    fn test_is_yes(#[case] answer: &str, #[case] expected: bool) {
        assert_eq!(is_yes(answer), expected);
    }
}
