//! Static lookup tables: frontends, profiles, databases.
//!
//! # Design Rationale
//!
//! Everything the generators need to know about a frontend kind, a profile or
//! a database kind is described exactly once here. Tables are `static`
//! slices: immutable, process-lifetime, no interior mutability. All lookups
//! are O(n) scans over a handful of entries.
//!
//! # Adding a New Frontend / Database / Profile
//!
//! 1. Add the variant in `value_objects.rs`
//! 2. Add one entry to the matching registry below
//! 3. `assert_registry_integrity` (run in tests) checks totality

use std::collections::BTreeSet;

use crate::domain::value_objects::{Architecture, DatabaseKind, Feature, FrontendKind, Profile};

/// An npm package name paired with its version range.
pub type Package = (&'static str, &'static str);

// ── Frontend definitions ─────────────────────────────────────────────────────

/// How far the generator goes for a frontend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendCapability {
    /// A complete, runnable application is generated.
    Supported,
    /// Only a manifest and a README are generated; deeper scaffolding is
    /// pending and the caller is told so.
    Stub,
}

/// Describes everything the frontend generator needs for one frontend kind.
#[derive(Debug, Clone, Copy)]
pub struct FrontendDef {
    pub kind: FrontendKind,

    /// Human-readable name for docs and prompts.
    pub display_name: &'static str,

    /// Default port of the frontend's dev/static server.
    pub port: u16,

    pub capability: FrontendCapability,

    /// Entry file written to the manifest's `main`.
    pub entry: &'static str,

    pub scripts: &'static [(&'static str, &'static str)],
    pub dependencies: &'static [Package],
    pub dev_dependencies: &'static [Package],
}

const VITE: Package = ("vite", "^5.0.10");

/// Single source of truth for frontend kinds. `FrontendKind::None` has no
/// entry: it has no port and nothing is generated for it.
pub static FRONTEND_REGISTRY: &[FrontendDef] = &[
    FrontendDef {
        kind: FrontendKind::Vanilla,
        display_name: "Vanilla HTML/CSS/JS",
        port: 8080,
        capability: FrontendCapability::Supported,
        entry: "app.js",
        scripts: &[("start", "npx serve -l 8080 .")],
        dependencies: &[],
        dev_dependencies: &[],
    },
    FrontendDef {
        kind: FrontendKind::Vue,
        display_name: "Vue 3 (Vite)",
        port: 5173,
        capability: FrontendCapability::Stub,
        entry: "src/main.js",
        scripts: &[
            ("dev", "vite --port 5173"),
            ("build", "vite build"),
            ("preview", "vite preview"),
        ],
        dependencies: &[("vue", "^3.4.0"), ("axios", "^1.6.2")],
        dev_dependencies: &[VITE, ("@vitejs/plugin-vue", "^5.0.0")],
    },
    FrontendDef {
        kind: FrontendKind::Next,
        display_name: "Next.js",
        port: 3000,
        capability: FrontendCapability::Stub,
        entry: "app/page.js",
        scripts: &[
            ("dev", "next dev -p 3000"),
            ("build", "next build"),
            ("start", "next start -p 3000"),
        ],
        dependencies: &[
            ("next", "^14.0.4"),
            ("react", "^18.2.0"),
            ("react-dom", "^18.2.0"),
        ],
        dev_dependencies: &[("eslint-config-next", "^14.0.4")],
    },
    FrontendDef {
        kind: FrontendKind::Angular,
        display_name: "Angular",
        port: 4200,
        capability: FrontendCapability::Stub,
        entry: "src/main.ts",
        scripts: &[
            ("start", "ng serve --port 4200"),
            ("build", "ng build"),
            ("test", "ng test"),
        ],
        dependencies: &[
            ("@angular/common", "^17.0.0"),
            ("@angular/core", "^17.0.0"),
            ("@angular/platform-browser", "^17.0.0"),
            ("@angular/router", "^17.0.0"),
            ("rxjs", "^7.8.1"),
            ("tslib", "^2.6.2"),
            ("zone.js", "^0.14.2"),
        ],
        dev_dependencies: &[
            ("@angular/cli", "^17.0.0"),
            ("@angular/compiler-cli", "^17.0.0"),
            ("typescript", "~5.2.2"),
        ],
    },
    FrontendDef {
        kind: FrontendKind::React,
        display_name: "React (Vite)",
        port: 5173,
        capability: FrontendCapability::Stub,
        entry: "src/main.jsx",
        scripts: &[
            ("dev", "vite --port 5173"),
            ("build", "vite build"),
            ("preview", "vite preview"),
        ],
        dependencies: &[
            ("react", "^18.2.0"),
            ("react-dom", "^18.2.0"),
            ("axios", "^1.6.2"),
        ],
        dev_dependencies: &[VITE, ("@vitejs/plugin-react", "^4.2.1")],
    },
    FrontendDef {
        kind: FrontendKind::Svelte,
        display_name: "Svelte (Vite)",
        port: 5173,
        capability: FrontendCapability::Stub,
        entry: "src/main.js",
        scripts: &[
            ("dev", "vite --port 5173"),
            ("build", "vite build"),
            ("preview", "vite preview"),
        ],
        dependencies: &[],
        dev_dependencies: &[
            VITE,
            ("svelte", "^4.2.8"),
            ("@sveltejs/vite-plugin-svelte", "^3.0.1"),
        ],
    },
];

/// Find the registry entry for a frontend kind. `None` for `FrontendKind::None`.
pub fn find_frontend(kind: FrontendKind) -> Option<&'static FrontendDef> {
    FRONTEND_REGISTRY.iter().find(|def| def.kind == kind)
}

/// The FRONTEND_PORTS mapping: default serving port of a frontend kind.
///
/// Returns `None` only for `FrontendKind::None`, for which no port
/// resolution occurs.
pub fn frontend_port(kind: FrontendKind) -> Option<u16> {
    find_frontend(kind).map(|def| def.port)
}

/// Capability of a frontend kind. `None` for `FrontendKind::None`.
pub fn frontend_capability(kind: FrontendKind) -> Option<FrontendCapability> {
    find_frontend(kind).map(|def| def.capability)
}

/// Origin the backend's CORS configuration must allow for a frontend.
pub fn frontend_origin(kind: FrontendKind) -> Option<String> {
    frontend_port(kind).map(|port| format!("http://localhost:{port}"))
}

// ── Profile definitions ──────────────────────────────────────────────────────

/// A profile's canonical expansion.
#[derive(Debug, Clone, Copy)]
pub struct ProfileDef {
    pub profile: Profile,
    pub description: &'static str,
    pub features: &'static [Feature],
    pub architecture: Architecture,
}

pub static PROFILE_REGISTRY: &[ProfileDef] = &[
    ProfileDef {
        profile: Profile::Startup,
        description: "Lean MVC API with logging, validation and tests",
        features: &[
            Feature::Logging,
            Feature::Validation,
            Feature::Testing,
            Feature::RateLimit,
        ],
        architecture: Architecture::Mvc,
    },
    ProfileDef {
        profile: Profile::Enterprise,
        description: "Clean architecture with auth, docs and every safeguard",
        features: &[
            Feature::Auth,
            Feature::Logging,
            Feature::Validation,
            Feature::Testing,
            Feature::Docs,
            Feature::RateLimit,
            Feature::GracefulShutdown,
        ],
        architecture: Architecture::Clean,
    },
    ProfileDef {
        profile: Profile::Microservice,
        description: "Small service tuned for containers and fast tests",
        features: &[
            Feature::Logging,
            Feature::Validation,
            Feature::Testing,
            Feature::Vitest,
            Feature::Docs,
            Feature::RateLimit,
            Feature::GracefulShutdown,
        ],
        architecture: Architecture::Microservices,
    },
];

pub fn find_profile(profile: Profile) -> Option<&'static ProfileDef> {
    PROFILE_REGISTRY.iter().find(|def| def.profile == profile)
}

/// Expand a profile into its canonical feature set and architecture.
///
/// The registry is total over `Profile` (checked by
/// `assert_registry_integrity`), so the fallback is never taken in practice.
pub fn expand_profile(profile: Profile) -> (BTreeSet<Feature>, Architecture) {
    find_profile(profile)
        .map(|def| (def.features.iter().copied().collect(), def.architecture))
        .unwrap_or_default()
}

// ── Database definitions ─────────────────────────────────────────────────────

/// Connection details of a networked database server. Development-only
/// credentials, shared by the env file and the compose file.
#[derive(Debug, Clone, Copy)]
pub struct DatabaseServer {
    pub port: u16,
    pub user: &'static str,
    pub password: &'static str,
    /// URL scheme of `DATABASE_URL`.
    pub scheme: &'static str,
    /// Appended to `DATABASE_URL` verbatim.
    pub url_query: &'static str,
    /// Pinned compose image.
    pub image: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct DatabaseDef {
    pub database: DatabaseKind,
    pub display_name: &'static str,
    /// The single driver dependency.
    pub driver: Option<Package>,
    /// `@types` package, only emitted for TypeScript backends.
    pub types: Option<Package>,
    /// `None` for embedded databases (sqlite) and for `DatabaseKind::None`.
    pub server: Option<DatabaseServer>,
}

pub static DATABASE_REGISTRY: &[DatabaseDef] = &[
    DatabaseDef {
        database: DatabaseKind::None,
        display_name: "None",
        driver: None,
        types: None,
        server: None,
    },
    DatabaseDef {
        database: DatabaseKind::Postgres,
        display_name: "PostgreSQL",
        driver: Some(("pg", "^8.11.3")),
        types: Some(("@types/pg", "^8.10.9")),
        server: Some(DatabaseServer {
            port: 5432,
            user: "postgres",
            password: "postgres",
            scheme: "postgresql",
            url_query: "",
            image: "postgres:16-alpine",
        }),
    },
    DatabaseDef {
        database: DatabaseKind::Mysql,
        display_name: "MySQL",
        driver: Some(("mysql2", "^3.6.5")),
        types: None,
        server: Some(DatabaseServer {
            port: 3306,
            user: "root",
            password: "mysql",
            scheme: "mysql",
            url_query: "",
            image: "mysql:8.0",
        }),
    },
    DatabaseDef {
        database: DatabaseKind::Mongodb,
        display_name: "MongoDB",
        driver: Some(("mongoose", "^8.0.3")),
        types: None,
        server: Some(DatabaseServer {
            port: 27017,
            user: "mongo",
            password: "mongo",
            scheme: "mongodb",
            url_query: "?authSource=admin",
            image: "mongo:7.0",
        }),
    },
    DatabaseDef {
        database: DatabaseKind::Sqlite,
        display_name: "SQLite",
        driver: Some(("better-sqlite3", "^9.2.2")),
        types: Some(("@types/better-sqlite3", "^7.6.8")),
        server: None,
    },
];

pub fn find_database(database: DatabaseKind) -> Option<&'static DatabaseDef> {
    DATABASE_REGISTRY.iter().find(|def| def.database == database)
}

/// Every database driver package name known to the registry.
pub fn all_driver_names() -> impl Iterator<Item = &'static str> {
    DATABASE_REGISTRY
        .iter()
        .filter_map(|def| def.driver.map(|(name, _)| name))
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registries are total and internally consistent.
///
/// Call this in a test; it panics with a clear message on any violation.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    for kind in FrontendKind::ALL {
        let entries = FRONTEND_REGISTRY.iter().filter(|d| d.kind == kind).count();
        let expected = usize::from(!kind.is_none());
        assert_eq!(
            entries, expected,
            "FrontendKind::{kind:?} must have exactly {expected} registry entries"
        );
    }

    for def in FRONTEND_REGISTRY {
        assert!(def.port > 0, "{:?} has no port", def.kind);
        assert!(!def.scripts.is_empty(), "{:?} has no scripts", def.kind);
    }

    for profile in Profile::ALL {
        let def = find_profile(profile)
            .unwrap_or_else(|| panic!("Profile::{profile:?} is not registered"));
        assert!(!def.features.is_empty(), "{profile:?} expands to nothing");
    }

    for database in DatabaseKind::ALL {
        let def = find_database(database)
            .unwrap_or_else(|| panic!("DatabaseKind::{database:?} is not registered"));
        assert_eq!(
            def.driver.is_some(),
            !database.is_none(),
            "{database:?}: a driver exists iff a database is configured"
        );
        if let Some(server) = def.server {
            assert!(!server.image.is_empty(), "{database:?} needs a compose image");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_internally_consistent() {
        assert_registry_integrity();
    }

    #[test]
    fn frontend_ports_match_dev_server_defaults() {
        assert_eq!(frontend_port(FrontendKind::Vanilla), Some(8080));
        assert_eq!(frontend_port(FrontendKind::Vue), Some(5173));
        assert_eq!(frontend_port(FrontendKind::React), Some(5173));
        assert_eq!(frontend_port(FrontendKind::Svelte), Some(5173));
        assert_eq!(frontend_port(FrontendKind::Angular), Some(4200));
        assert_eq!(frontend_port(FrontendKind::Next), Some(3000));
    }

    #[test]
    fn none_frontend_has_no_port() {
        assert_eq!(frontend_port(FrontendKind::None), None);
        assert_eq!(frontend_origin(FrontendKind::None), None);
    }

    #[test]
    fn only_vanilla_is_fully_supported() {
        for def in FRONTEND_REGISTRY {
            let expected = if def.kind == FrontendKind::Vanilla {
                FrontendCapability::Supported
            } else {
                FrontendCapability::Stub
            };
            assert_eq!(def.capability, expected, "{:?}", def.kind);
        }
    }

    #[test]
    fn vanilla_serves_static_files_only() {
        let def = find_frontend(FrontendKind::Vanilla).unwrap();
        assert_eq!(def.scripts.len(), 1);
        assert_eq!(def.scripts[0].0, "start");
        assert!(def.dependencies.is_empty());
    }

    #[test]
    fn profiles_expand_deterministically() {
        let (a, arch_a) = expand_profile(Profile::Enterprise);
        let (b, arch_b) = expand_profile(Profile::Enterprise);
        assert_eq!(a, b);
        assert_eq!(arch_a, arch_b);
        assert!(a.contains(&Feature::Auth));
        assert_eq!(arch_a, Architecture::Clean);
    }

    #[test]
    fn microservice_profile_uses_microservices_architecture() {
        let (features, arch) = expand_profile(Profile::Microservice);
        assert_eq!(arch, Architecture::Microservices);
        assert!(features.contains(&Feature::GracefulShutdown));
    }

    #[test]
    fn drivers_are_distinct() {
        let names: Vec<_> = all_driver_names().collect();
        let unique: BTreeSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn sqlite_is_embedded() {
        let def = find_database(DatabaseKind::Sqlite).unwrap();
        assert!(def.server.is_none());
        assert_eq!(def.driver.unwrap().0, "better-sqlite3");
    }
}
