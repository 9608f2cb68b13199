use std::collections::BTreeMap;

use crate::domain::{
    entities::{ProjectConfig, TestFamily},
    registry::{self, Package},
    value_objects::Feature,
};

const CORE: &[Package] = &[
    ("express", "^4.18.2"),
    ("cors", "^2.8.5"),
    ("dotenv", "^16.3.1"),
    ("helmet", "^7.1.0"),
    ("compression", "^1.7.4"),
    ("express-rate-limit", "^7.1.5"),
];
const LOGGING: &[Package] = &[
    ("winston", "^3.11.0"),
    ("winston-daily-rotate-file", "^4.7.1"),
];
const REQUEST_LOG: Package = ("morgan", "^1.10.0");
const ZOD: Package = ("zod", "^3.22.4");
const JOI: Package = ("joi", "^17.11.0");
const AUTH: &[Package] = &[
    ("jsonwebtoken", "^9.0.2"),
    ("bcryptjs", "^2.4.3"),
    ("express-jwt", "^8.4.1"),
];
const DOCS: &[Package] = &[
    ("swagger-jsdoc", "^6.2.8"),
    ("swagger-ui-express", "^5.0.0"),
    ("yamljs", "^0.3.0"),
];

const TOOLING: &[Package] = &[
    ("nodemon", "^3.0.2"),
    ("eslint", "^8.56.0"),
    ("prettier", "^3.1.1"),
];
const TS_TOOLCHAIN: &[Package] = &[
    ("typescript", "^5.3.3"),
    ("ts-node", "^10.9.2"),
    ("@types/node", "^20.10.5"),
    ("@typescript-eslint/parser", "^6.15.0"),
    ("@typescript-eslint/eslint-plugin", "^6.15.0"),
];
const VITEST: &[Package] = &[("vitest", "^1.1.0"), ("@vitest/coverage-v8", "^1.1.0")];
const JEST: Package = ("jest", "^29.7.0");
const TS_JEST: &[Package] = &[("ts-jest", "^29.1.1"), ("@types/jest", "^29.5.11")];
const SUPERTEST: Package = ("supertest", "^6.3.3");

/// `@types` package for a runtime package that does not ship its own types.
fn types_for(package: &str) -> Option<Package> {
    let types = match package {
        "express" => ("@types/express", "^4.17.21"),
        "cors" => ("@types/cors", "^2.8.17"),
        "compression" => ("@types/compression", "^1.7.5"),
        "morgan" => ("@types/morgan", "^1.9.9"),
        "jsonwebtoken" => ("@types/jsonwebtoken", "^9.0.5"),
        "bcryptjs" => ("@types/bcryptjs", "^2.4.6"),
        "swagger-jsdoc" => ("@types/swagger-jsdoc", "^6.0.4"),
        "swagger-ui-express" => ("@types/swagger-ui-express", "^4.1.6"),
        "yamljs" => ("@types/yamljs", "^0.2.34"),
        "supertest" => ("@types/supertest", "^6.0.2"),
        other => {
            return registry::DATABASE_REGISTRY
                .iter()
                .find(|def| def.driver.is_some_and(|(name, _)| name == other))
                .and_then(|def| def.types);
        }
    };
    Some(types)
}

fn extend(map: &mut BTreeMap<String, String>, packages: &[Package]) {
    map.extend(
        packages
            .iter()
            .map(|(name, version)| (name.to_string(), version.to_string())),
    );
}

/// Runtime dependencies of the backend manifest.
pub fn resolve_dependencies(config: &ProjectConfig) -> BTreeMap<String, String> {
    let mut deps = BTreeMap::new();
    extend(&mut deps, CORE);

    if config.has(Feature::Logging) {
        extend(&mut deps, LOGGING);
    } else {
        extend(&mut deps, &[REQUEST_LOG]);
    }

    if config.has(Feature::Validation) {
        let validator = if config.backend_lang().is_typescript() {
            ZOD
        } else {
            JOI
        };
        extend(&mut deps, &[validator]);
    }

    if let Some(driver) = registry::find_database(config.database()).and_then(|d| d.driver) {
        extend(&mut deps, &[driver]);
    }

    if config.has(Feature::Auth) {
        extend(&mut deps, AUTH);
    }
    if config.has(Feature::Docs) {
        extend(&mut deps, DOCS);
    }

    deps
}

/// Development dependencies of the backend manifest.
///
/// The `@types` packages mirror whatever `resolve_dependencies` selected, so
/// the two must be resolved from the same config.
pub fn resolve_dev_dependencies(config: &ProjectConfig) -> BTreeMap<String, String> {
    let typescript = config.backend_lang().is_typescript();
    let mut dev = BTreeMap::new();
    extend(&mut dev, TOOLING);

    match config.test_family() {
        Some(TestFamily::Vitest) => extend(&mut dev, VITEST),
        Some(TestFamily::Jest) => {
            extend(&mut dev, &[JEST]);
            if typescript {
                extend(&mut dev, TS_JEST);
            }
        }
        None => {}
    }
    if config.test_family().is_some() {
        extend(&mut dev, &[SUPERTEST]);
    }

    if typescript {
        extend(&mut dev, TS_TOOLCHAIN);
        let runtime = resolve_dependencies(config);
        let mirrored: Vec<Package> = runtime
            .keys()
            .chain(dev.keys())
            .filter_map(|name| types_for(name))
            .collect();
        extend(&mut dev, &mirrored);
    }

    dev
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{BackendLang, DatabaseKind};

    fn config(lang: BackendLang, db: DatabaseKind, features: &[Feature]) -> ProjectConfig {
        ProjectConfig::builder()
            .name("api")
            .backend_lang(lang)
            .database(db)
            .features(features.iter().copied())
            .build()
            .unwrap()
    }

    #[test]
    fn core_packages_are_always_present() {
        let deps = resolve_dependencies(&config(BackendLang::JavaScript, DatabaseKind::None, &[]));
        for (name, _) in CORE {
            assert!(deps.contains_key(*name), "{name}");
        }
    }

    #[test]
    fn logging_replaces_morgan() {
        let plain = resolve_dependencies(&config(BackendLang::TypeScript, DatabaseKind::None, &[]));
        assert!(plain.contains_key("morgan"));
        assert!(!plain.contains_key("winston"));

        let logged = resolve_dependencies(&config(
            BackendLang::TypeScript,
            DatabaseKind::None,
            &[Feature::Logging],
        ));
        assert!(logged.contains_key("winston"));
        assert!(logged.contains_key("winston-daily-rotate-file"));
        assert!(!logged.contains_key("morgan"));
    }

    #[test]
    fn validation_library_follows_language() {
        let ts = resolve_dependencies(&config(
            BackendLang::TypeScript,
            DatabaseKind::None,
            &[Feature::Validation],
        ));
        assert!(ts.contains_key("zod") && !ts.contains_key("joi"));

        let js = resolve_dependencies(&config(
            BackendLang::JavaScript,
            DatabaseKind::None,
            &[Feature::Validation],
        ));
        assert!(js.contains_key("joi") && !js.contains_key("zod"));
    }

    #[test]
    fn exactly_one_driver_per_database() {
        for db in DatabaseKind::ALL {
            let deps = resolve_dependencies(&config(BackendLang::TypeScript, db, &[]));
            let drivers = registry::all_driver_names()
                .filter(|d| deps.contains_key(*d))
                .count();
            assert_eq!(drivers, usize::from(!db.is_none()), "{db}");
        }
    }

    #[test]
    fn javascript_never_gets_type_packages() {
        let dev = resolve_dev_dependencies(&config(
            BackendLang::JavaScript,
            DatabaseKind::Postgres,
            &[Feature::Testing, Feature::Auth, Feature::Docs],
        ));
        assert!(dev.keys().all(|k| !k.starts_with("@types/")));
        assert!(!dev.contains_key("typescript"));
        assert!(!dev.contains_key("ts-jest"));
        assert!(dev.contains_key("jest"));
    }

    #[test]
    fn typescript_types_mirror_runtime_packages() {
        let dev = resolve_dev_dependencies(&config(
            BackendLang::TypeScript,
            DatabaseKind::Postgres,
            &[Feature::Auth],
        ));
        assert!(dev.contains_key("@types/express"));
        assert!(dev.contains_key("@types/morgan"));
        assert!(dev.contains_key("@types/jsonwebtoken"));
        assert!(dev.contains_key("@types/pg"));
        assert!(!dev.contains_key("@types/swagger-jsdoc"));
    }

    #[test]
    fn vitest_excludes_jest_family() {
        let dev = resolve_dev_dependencies(&config(
            BackendLang::TypeScript,
            DatabaseKind::None,
            &[Feature::Testing, Feature::Vitest],
        ));
        assert!(dev.contains_key("vitest"));
        assert!(dev.contains_key("@vitest/coverage-v8"));
        assert!(!dev.contains_key("jest"));
        assert!(!dev.contains_key("@types/jest"));
        assert!(dev.contains_key("supertest"));
        assert!(dev.contains_key("@types/supertest"));
    }
}
