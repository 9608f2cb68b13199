//! Container files of the backend; only emitted with the `docker` flag.
//!
//! Compose credentials come from the same registry entry as the env file, so
//! the two can never disagree.

use serde_yaml::Value;

use super::{fill, join_blocks, yaml};
use crate::domain::{DatabaseKind, Feature, ProjectConfig, registry};
use crate::error::StackforgeResult;

pub const NODE_IMAGE: &str = "node:20-alpine";

const DOCKERFILE: &str = r#"# ---- Development ----
FROM {{IMAGE}} AS development
WORKDIR /app
COPY package*.json ./
RUN npm install
COPY . .
{{BUILD}}EXPOSE {{PORT}}
CMD ["npm", "run", "dev"]

# ---- Production ----
FROM {{IMAGE}} AS production
ENV NODE_ENV=production
WORKDIR /app
COPY package*.json ./
RUN npm install --omit=dev && npm cache clean --force
{{COPY_APP}}RUN mkdir -p {{WRITABLE}} && chown -R node:node {{WRITABLE}}
USER node
EXPOSE {{PORT}}
CMD ["npm", "start"]
"#;

pub fn dockerfile(config: &ProjectConfig) -> String {
    let ts = config.backend_lang().is_typescript();
    let build = if ts { "RUN npm run build\n" } else { "" };
    let app = if ts {
        "COPY --from=development --chown=node:node /app/dist ./dist\n"
    } else {
        "COPY --chown=node:node src ./src\n"
    };
    let docs = if config.has(Feature::Docs) {
        "COPY --chown=node:node docs ./docs\n"
    } else {
        ""
    };
    let copy_app = join_blocks([app, docs]);
    let writable = if config.database() == DatabaseKind::Sqlite {
        "logs data"
    } else {
        "logs"
    };
    let port = config.port().to_string();

    fill(
        DOCKERFILE,
        &[
            ("IMAGE", NODE_IMAGE),
            ("BUILD", build),
            ("PORT", &port),
            ("COPY_APP", &copy_app),
            ("WRITABLE", writable),
        ],
    )
}

pub fn dockerignore() -> String {
    [
        "node_modules",
        "npm-debug.log",
        "dist",
        "coverage",
        "logs",
        "data",
        ".env",
        ".git",
        ".gitignore",
        "Dockerfile",
        "docker-compose.yml",
        "tests",
    ]
    .join("\n")
        + "\n"
}

pub const COMPOSE_PATH: &str = "docker-compose.yml";

/// Image-specific environment of the database service.
fn db_environment(database: DatabaseKind, user: &str, password: &str, db_name: &str) -> Value {
    let entries: Vec<(&str, &str)> = match database {
        DatabaseKind::Postgres => vec![
            ("POSTGRES_USER", user),
            ("POSTGRES_PASSWORD", password),
            ("POSTGRES_DB", db_name),
        ],
        DatabaseKind::Mysql => vec![("MYSQL_ROOT_PASSWORD", password), ("MYSQL_DATABASE", db_name)],
        DatabaseKind::Mongodb => vec![
            ("MONGO_INITDB_ROOT_USERNAME", user),
            ("MONGO_INITDB_ROOT_PASSWORD", password),
            ("MONGO_INITDB_DATABASE", db_name),
        ],
        DatabaseKind::Sqlite | DatabaseKind::None => Vec::new(),
    };
    Value::Mapping(
        entries
            .into_iter()
            .map(|(key, value)| (Value::from(key), Value::from(value)))
            .collect(),
    )
}

fn data_path(database: DatabaseKind) -> &'static str {
    match database {
        DatabaseKind::Postgres => "/var/lib/postgresql/data",
        DatabaseKind::Mysql => "/var/lib/mysql",
        DatabaseKind::Mongodb => "/data/db",
        DatabaseKind::Sqlite | DatabaseKind::None => "/app/data",
    }
}

/// `docker-compose.yml`; `None` without a database.
pub fn compose(config: &ProjectConfig) -> StackforgeResult<Option<String>> {
    if !config.has_database() {
        return Ok(None);
    }
    let Some(def) = registry::find_database(config.database()) else {
        return Ok(None);
    };
    let port = config.port();
    let build = yaml::map([
        ("context", ".".into()),
        ("target", "development".into()),
    ]);
    let ports = yaml::seq([format!("{port}:{port}")]);

    let doc = match def.server {
        Some(server) => {
            let db_name = config.database_name();
            let url = format!(
                "{}://{}:{}@db:{}/{}{}",
                server.scheme, server.user, server.password, server.port, db_name, server.url_query
            );
            let app = yaml::map([
                ("build", build),
                ("ports", ports),
                ("env_file", yaml::seq([".env"])),
                (
                    "environment",
                    yaml::map([
                        ("PORT", port.to_string().into()),
                        ("DB_HOST", "db".into()),
                        ("DATABASE_URL", url.into()),
                    ]),
                ),
                ("depends_on", yaml::seq(["db"])),
                ("volumes", yaml::seq(["./src:/app/src"])),
            ]);
            let db = yaml::map([
                ("image", server.image.into()),
                ("restart", "unless-stopped".into()),
                (
                    "environment",
                    db_environment(config.database(), server.user, server.password, &db_name),
                ),
                ("ports", yaml::seq([format!("{p}:{p}", p = server.port)])),
                (
                    "volumes",
                    yaml::seq([format!("db-data:{}", data_path(config.database()))]),
                ),
            ]);
            yaml::map([
                ("services", yaml::map([("app", app), ("db", db)])),
                ("volumes", yaml::map([("db-data", yaml::empty_map())])),
            ])
        }
        None => {
            let app = yaml::map([
                ("build", build),
                ("ports", ports),
                ("env_file", yaml::seq([".env"])),
                ("environment", yaml::map([("PORT", port.to_string().into())])),
                (
                    "volumes",
                    yaml::seq([
                        "./src:/app/src".to_string(),
                        format!("sqlite-data:{}", data_path(config.database())),
                    ]),
                ),
            ]);
            yaml::map([
                ("services", yaml::map([("app", app)])),
                ("volumes", yaml::map([("sqlite-data", yaml::empty_map())])),
            ])
        }
    };

    yaml::render(&doc, COMPOSE_PATH).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BackendLang;

    fn config(lang: BackendLang, db: DatabaseKind) -> ProjectConfig {
        ProjectConfig::builder()
            .name("shop")
            .backend_lang(lang)
            .database(db)
            .docker(true)
            .build()
            .unwrap()
    }

    #[test]
    fn dockerfile_has_two_stages_and_runs_as_node() {
        let body = dockerfile(&config(BackendLang::TypeScript, DatabaseKind::None));
        assert!(body.contains("FROM node:20-alpine AS development"));
        assert!(body.contains("FROM node:20-alpine AS production"));
        assert!(body.contains("CMD [\"npm\", \"run\", \"dev\"]"));
        assert!(body.contains("CMD [\"npm\", \"start\"]"));
        assert!(body.contains("USER node"));
        assert!(body.contains("RUN npm run build"));
        assert!(body.contains("EXPOSE 5000"));
    }

    #[test]
    fn javascript_image_copies_sources() {
        let body = dockerfile(&config(BackendLang::JavaScript, DatabaseKind::None));
        assert!(!body.contains("npm run build"));
        assert!(body.contains("COPY --chown=node:node src ./src"));
    }

    fn parsed_compose(db: DatabaseKind) -> Value {
        let body = compose(&config(BackendLang::TypeScript, db)).unwrap().unwrap();
        serde_yaml::from_str(&body).unwrap()
    }

    #[test]
    fn no_compose_without_database() {
        assert!(compose(&config(BackendLang::TypeScript, DatabaseKind::None)).unwrap().is_none());
    }

    #[test]
    fn compose_image_matches_driver() {
        let cases = [
            (DatabaseKind::Postgres, "postgres:16-alpine", "POSTGRES_PASSWORD", "postgres"),
            (DatabaseKind::Mysql, "mysql:8.0", "MYSQL_ROOT_PASSWORD", "mysql"),
            (DatabaseKind::Mongodb, "mongo:7.0", "MONGO_INITDB_ROOT_USERNAME", "mongo"),
        ];
        for (db, image, key, credential) in cases {
            let doc = parsed_compose(db);
            let services = &doc["services"];
            assert_eq!(services["db"]["image"], Value::from(image), "{db}");
            assert_eq!(services["db"]["environment"][key], Value::from(credential), "{db}");
            assert_eq!(services["app"]["environment"]["DB_HOST"], Value::from("db"));
            assert_eq!(services["app"]["environment"]["PORT"], Value::from("5000"));
            assert_eq!(services["app"]["ports"][0], Value::from("5000:5000"));
        }
    }

    #[test]
    fn postgres_url_points_at_the_db_service() {
        let doc = parsed_compose(DatabaseKind::Postgres);
        assert_eq!(
            doc["services"]["app"]["environment"]["DATABASE_URL"],
            Value::from("postgresql://postgres:postgres@db:5432/shop_db")
        );
        assert!(doc["volumes"].get("db-data").is_some());
    }

    #[test]
    fn sqlite_compose_is_app_only_with_volume() {
        let doc = parsed_compose(DatabaseKind::Sqlite);
        assert!(doc["services"].get("db").is_none());
        assert_eq!(
            doc["services"]["app"]["volumes"][1],
            Value::from("sqlite-data:/app/data")
        );
        assert!(doc["volumes"].get("sqlite-data").is_some());
    }
}
