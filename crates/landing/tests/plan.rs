//! End-to-end tests for planning
//!
//! A config file is written to disk, files are dropped into the source
//! directories, and the router's plan is checked.

use landing::{BatchSummary, LandingConfig, LandingError, RouteDecision, Router};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temp directories plus a config file pointing at them
struct TestEnv {
    _temp: TempDir,
    pub root: PathBuf,
    pub config_path: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().to_path_buf();
        let config_path = root.join("landing.toml");
        Self {
            _temp: temp,
            root,
            config_path,
        }
    }

    fn dir(&self, name: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }

    fn drop_files(&self, dir: &str, names: &[&str]) {
        let dir = self.dir(dir);
        for name in names {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent");
            }
            fs::write(path, "data").expect("Failed to write file");
        }
    }

    fn write_config(&self, body: &str) -> LandingConfig {
        let body = body.replace("ROOT", &self.root.display().to_string());
        fs::write(&self.config_path, body).expect("Failed to write config");
        LandingConfig::load(&self.config_path).expect("Failed to load config")
    }
}

const TWO_UPLOADS: &str = r#"
[[uploads]]
name = "sales"
table = "sales"
pattern = "{table}_{?*}_{yyyyMMdd}.csv"
source_dir = "ROOT/inbound/sales"
destination = "ROOT/landing/sales"

[[uploads]]
name = "ticks"
table = "ticks"
pattern = "{table}_{yyyy-MM-dd'T'HH}.txt"
source_dir = "ROOT/inbound/ticks"
destination = "ROOT/landing/ticks"
recursive = true

[[uploads]]
name = "retired"
table = "old"
pattern = "{table}_{yyyy}.csv"
source_dir = "ROOT/inbound/missing"
destination = "ROOT/landing/old"
enabled = false
"#;

// ============================================================================
// Planning
// ============================================================================

#[test]
fn test_plan_routes_each_upload() {
    let env = TestEnv::new();
    env.drop_files(
        "inbound/sales",
        &[
            "sales_EU_20140102.csv",
            "sales_EU_20140102.ctl",
            "sales_20140102.csv",
            "orders_EU_20140102.csv",
        ],
    );
    env.drop_files(
        "inbound/ticks",
        &["ticks_2014-01-02T07.txt", "late/ticks_2014-01-03T23.txt"],
    );
    let config = env.write_config(TWO_UPLOADS);
    config.validate().expect("config should be valid");

    let router = Router::from_config(&config).unwrap();
    assert_eq!(router.uploads().len(), 2);

    let plan = router.plan().unwrap();
    let names: Vec<&str> = plan.uploads.iter().map(|u| u.upload.as_str()).collect();
    assert_eq!(names, vec!["sales", "ticks"]);

    let sales = &plan.uploads[0];
    assert_eq!(
        sales.summary,
        BatchSummary {
            routed: 1,
            control: 1,
            unmatched: 2,
            rejected: 0,
        }
    );
    let routed: Vec<_> = sales
        .decisions
        .iter()
        .filter_map(|d| match d {
            RouteDecision::Routed(route) => Some(route),
            _ => None,
        })
        .collect();
    assert_eq!(routed.len(), 1);
    assert_eq!(routed[0].dirs, vec!["2014", "01", "02", "EU"]);
    assert_eq!(
        routed[0].destination,
        env.root
            .join("landing/sales/2014/01/02/EU")
            .join("sales_EU_20140102.csv")
    );

    let ticks = &plan.uploads[1];
    assert_eq!(ticks.summary.routed, 2);
    let destinations: Vec<PathBuf> = ticks
        .decisions
        .iter()
        .filter_map(|d| match d {
            RouteDecision::Routed(route) => Some(route.destination.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        destinations,
        vec![
            env.root
                .join("landing/ticks/2014/01/03/23/ticks_2014-01-03T23.txt"),
            env.root
                .join("landing/ticks/2014/01/02/07/ticks_2014-01-02T07.txt"),
        ]
    );

    assert_eq!(plan.totals().total(), 6);
    assert!(!plan.has_rejections());
}

#[test]
fn test_plan_reports_rejections() {
    let env = TestEnv::new();
    env.drop_files(
        "inbound/sales",
        &["sales_2014_20140102.csv", "sales_2013_20140102.csv"],
    );
    let config = env.write_config(
        r#"
[[uploads]]
name = "sales"
table = "sales"
pattern = "{table}_{yyyy}_{yyyyMMdd}.csv"
source_dir = "ROOT/inbound/sales"
destination = "ROOT/landing/sales"
"#,
    );

    let plan = Router::from_config(&config).unwrap().plan().unwrap();
    assert!(plan.has_rejections());
    assert_eq!(plan.totals().routed, 1);
    assert_eq!(plan.totals().rejected, 1);

    let json = serde_json::to_value(&plan).unwrap();
    let decisions = &json["uploads"][0]["decisions"];
    assert_eq!(decisions[0]["decision"], "rejected");
    assert_eq!(decisions[1]["decision"], "routed");
}

#[test]
fn test_plan_fails_on_missing_source_dir() {
    let env = TestEnv::new();
    let config = env.write_config(
        r#"
[[uploads]]
name = "sales"
table = "sales"
pattern = "{table}_{yyyy}.csv"
source_dir = "ROOT/nowhere"
destination = "ROOT/landing"
"#,
    );

    let router = Router::from_config(&config).unwrap();
    assert!(matches!(
        router.plan(),
        Err(LandingError::SourceDir { .. })
    ));
}

// ============================================================================
// Config validation
// ============================================================================

#[test]
fn test_invalid_pattern_is_reported_with_upload_name() {
    let env = TestEnv::new();
    let config = env.write_config(
        r#"
[[uploads]]
name = "hourly"
table = "h"
pattern = "{table}_{yyyyMMdd}{mm}.csv"
source_dir = "ROOT/in"
destination = "ROOT/out"
"#,
    );

    let err = config.validate().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("hourly"), "{message}");
    assert!(message.contains("hour"), "{message}");
}
