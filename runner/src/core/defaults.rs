//! Built-in default configuration.
//!
//! Every key a user may override in `ci.json` is declared here. Key order is
//! part of the contract: it is the enumeration order of the effective tree.

use super::value::{ConfigTree, ConfigValue};

/// Name of the optional override file at the project root.
pub const CONFIG_FILE_NAME: &str = "ci.json";

/// Build the default configuration tree.
pub fn default_tree() -> ConfigTree {
    let phpmd: ConfigTree = [
        ("enabled", ConfigValue::from(true)),
        ("path", "phpmd".into()),
        ("format", "xml".into()),
        ("files", "src/".into()),
        ("resultPath", "res/mess.xml".into()),
        (
            "inspections",
            vec![
                "cleancode",
                "codesize",
                "controversial",
                "design",
                "naming",
                "unusedcode",
            ]
            .into(),
        ),
    ]
    .into_iter()
    .collect();

    let phpcs: ConfigTree = [
        ("files", ConfigValue::from("src/")),
        ("enabled", true.into()),
        ("path", "phpcs".into()),
        ("format", "checkstyle".into()),
        ("resultPath", "res/checkstyle.xml".into()),
    ]
    .into_iter()
    .collect();

    let coverage: ConfigTree = [("format", "clover"), ("resultPath", "res/coverage.xml")]
        .into_iter()
        .collect();

    let phpunit: ConfigTree = [
        ("enabled", ConfigValue::from(true)),
        ("path", "phpunit".into()),
        ("bootstrap", "vendor/autoload.php".into()),
        ("files", "src/".into()),
        ("configurationFile", ConfigValue::Null),
        ("coverage", coverage.into()),
        ("format", "junit".into()),
        ("resultPath", "res/unit.xml".into()),
    ]
    .into_iter()
    .collect();

    let inspections: ConfigTree = [("phpmd", phpmd), ("phpcs", phpcs), ("phpunit", phpunit)]
        .into_iter()
        .collect();

    let hooks: ConfigTree = [
        ("inspections", ConfigValue::List(Vec::new())),
        ("cleanup", ConfigValue::List(Vec::new())),
    ]
    .into_iter()
    .collect();

    [("inspections", inspections), ("hooks", hooks)]
        .into_iter()
        .collect()
}
