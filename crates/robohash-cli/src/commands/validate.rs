//! Validate command implementation
//!
//! Loads one or all part sets and checks them against the catalog limits.

use anyhow::Result;
use colored::Colorize;
use robohash_core::{Catalog, CatalogProvider, GenerationError};
use std::process::ExitCode;

use super::json_output::{CommandOutput, JsonError, SetReport};
use crate::settings::{Settings, SourceArgs};

/// Run the validate command
///
/// # Arguments
/// * `settings` - Resolved configuration
/// * `source` - Set and catalog source flags
/// * `all` - Validate every set the provider knows
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every set is valid, 1 otherwise
pub fn run(
    settings: &Settings,
    source: &SourceArgs<'_>,
    all: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let listed = settings.provider(source).and_then(|provider| {
        let sets = if all {
            provider.set_names()?
        } else {
            vec![settings.set_name(source.set).to_string()]
        };
        Ok((provider, sets))
    });
    let (provider, sets) = match listed {
        Ok(listed) => listed,
        Err(e) if json_output => {
            CommandOutput::<Vec<SetReport>>::failure(vec![JsonError::from_anyhow(&e)]).print()?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e),
    };

    let reports: Vec<SetReport> = sets
        .iter()
        .map(|set| validate_set(provider.as_ref(), set))
        .collect();
    let ok = reports.iter().all(|r| r.valid);

    if json_output {
        let output = if ok {
            CommandOutput::success(reports)
        } else {
            let errors = reports.iter().filter_map(|r| r.error.clone()).collect();
            CommandOutput {
                success: false,
                errors,
                result: Some(reports),
            }
        };
        output.print()?;
    } else {
        print_reports(&reports);
    }

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Loads and validates one set.
pub fn validate_set(provider: &dyn CatalogProvider, set: &str) -> SetReport {
    match provider.catalog(set) {
        Ok(catalog) => report_for(set, &catalog),
        Err(e) => SetReport {
            set: set.to_string(),
            valid: false,
            colors: None,
            categories: None,
            required_draws: None,
            max_draws: None,
            choice_bits: None,
            error: Some(JsonError::from_generation(&GenerationError::describe(&e)).with_set(set)),
        },
    }
}

fn report_for(set: &str, catalog: &Catalog) -> SetReport {
    SetReport {
        set: set.to_string(),
        valid: true,
        colors: Some(catalog.color_names().len()),
        categories: Some(catalog.category_count()),
        required_draws: Some(catalog.required_draws()),
        max_draws: Some(catalog.budget().max_draws),
        choice_bits: Some(catalog.choice_bits()),
        error: None,
    }
}

fn print_reports(reports: &[SetReport]) {
    for report in reports {
        println!("{} {}", "Validating:".cyan().bold(), report.set);
        match &report.error {
            None => {
                println!(
                    "  {} {} colors, {} categories, {}/{} draws, {:.1} bits of choice",
                    "ok".green(),
                    report.colors.unwrap_or_default(),
                    report.categories.unwrap_or_default(),
                    report.required_draws.unwrap_or_default(),
                    report.max_draws.unwrap_or_default(),
                    report.choice_bits.unwrap_or_default()
                );
            }
            Some(error) => {
                println!("  {} [{}]: {}", "x".red(), error.code, error.message);
            }
        }
    }

    let failed = reports.iter().filter(|r| !r.valid).count();
    if failed == 0 {
        println!("\n{} {} set(s) valid", "SUCCESS".green().bold(), reports.len());
    } else {
        println!(
            "\n{} {} of {} set(s) invalid",
            "FAILED".red().bold(),
            failed,
            reports.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robohash_core::{CatalogLimits, JsonCatalogProvider};
    use std::collections::BTreeMap;

    fn provider() -> JsonCatalogProvider {
        let catalog = Catalog::from_json(
            r#"{"red": {"000#Mouth": ["a.png", "b.png"], "001#Eyes": ["c.png", "d.png", "e.png", "f.png"]},
                "blue": {"000#Mouth": ["a.png", "b.png"], "001#Eyes": ["c.png", "d.png", "e.png", "f.png"]}}"#,
        )
        .unwrap();
        let mut sets = BTreeMap::new();
        sets.insert("set1".to_string(), catalog);
        JsonCatalogProvider::Memory(sets)
    }

    #[test]
    fn test_valid_set_report() {
        let report = validate_set(&provider(), "set1");
        assert!(report.valid);
        assert_eq!(report.colors, Some(2));
        assert_eq!(report.categories, Some(2));
        assert_eq!(report.required_draws, Some(3));
        assert_eq!(report.max_draws, Some(8));
        // log2(2) + log2(2) + log2(4)
        assert!((report.choice_bits.unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_set_report() {
        let report = validate_set(&provider(), "set9");
        assert!(!report.valid);
        assert_eq!(report.error.unwrap().code, "R005");
    }

    #[test]
    fn test_strict_limits_reject_small_set() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("small.json");
        std::fs::write(
            &path,
            r#"{"red": {"000#Mouth": ["a.png", "b.png"]}, "blue": {"000#Mouth": ["a.png", "b.png"]}}"#,
        )
        .unwrap();

        let strict = JsonCatalogProvider::directory(tmp.path(), CatalogLimits::strict());
        let report = validate_set(&strict, "small");
        assert!(!report.valid);
        assert_eq!(report.error.unwrap().code, "R004");

        let lenient = JsonCatalogProvider::directory(tmp.path(), CatalogLimits::default());
        assert!(validate_set(&lenient, "small").valid);
    }
}
