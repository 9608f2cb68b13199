//! Tooling configuration files of the backend.

use serde_json::{Value, json};

use crate::domain::{DatabaseKind, ProjectConfig, TestFamily};
use crate::error::{Context, StackforgeResult};

fn pretty(value: &Value, file: &str) -> StackforgeResult<String> {
    let mut text = serde_json::to_string_pretty(value).context(format!("rendering {file}"))?;
    text.push('\n');
    Ok(text)
}

/// `tsconfig.json`; TypeScript backends only.
pub fn tsconfig() -> StackforgeResult<String> {
    let value = json!({
        "compilerOptions": {
            "target": "ES2020",
            "module": "commonjs",
            "lib": ["ES2020"],
            "rootDir": "./src",
            "outDir": "./dist",
            "strict": true,
            "esModuleInterop": true,
            "skipLibCheck": true,
            "forceConsistentCasingInFileNames": true,
            "resolveJsonModule": true,
            "sourceMap": true
        },
        "include": ["src/**/*"],
        "exclude": ["node_modules", "dist", "tests"]
    });
    pretty(&value, "tsconfig.json")
}

pub fn nodemon(config: &ProjectConfig) -> StackforgeResult<String> {
    let lang = config.backend_lang();
    let ext = lang.extension();
    let mut value = json!({
        "watch": ["src"],
        "ext": format!("{ext},json"),
        "ignore": [format!("src/**/*.test.{ext}")],
        "delay": 500
    });
    if lang.is_typescript() {
        value["exec"] = json!("ts-node ./src/index.ts");
    }
    pretty(&value, "nodemon.json")
}

pub fn eslintrc(config: &ProjectConfig) -> StackforgeResult<String> {
    let mut env = json!({ "node": true, "es2022": true });
    if config.test_family() == Some(TestFamily::Jest) {
        env["jest"] = json!(true);
    }

    let value = if config.backend_lang().is_typescript() {
        json!({
            "root": true,
            "env": env,
            "parser": "@typescript-eslint/parser",
            "parserOptions": { "ecmaVersion": 2022, "sourceType": "module" },
            "plugins": ["@typescript-eslint"],
            "extends": ["eslint:recommended", "plugin:@typescript-eslint/recommended"],
            "rules": {
                "@typescript-eslint/no-unused-vars": ["warn", { "argsIgnorePattern": "^_" }]
            }
        })
    } else {
        json!({
            "root": true,
            "env": env,
            "parserOptions": { "ecmaVersion": 2022, "sourceType": "script" },
            "extends": ["eslint:recommended"],
            "rules": {
                "no-unused-vars": ["warn", { "argsIgnorePattern": "^_" }]
            }
        })
    };
    pretty(&value, ".eslintrc.json")
}

pub fn prettierrc() -> StackforgeResult<String> {
    let value = json!({
        "semi": true,
        "singleQuote": true,
        "trailingComma": "all",
        "printWidth": 100,
        "tabWidth": 2
    });
    pretty(&value, ".prettierrc")
}

pub fn gitignore(config: &ProjectConfig) -> String {
    let mut lines = vec![
        "node_modules/",
        "dist/",
        "coverage/",
        "logs/",
        "*.log",
        ".env",
        ".DS_Store",
    ];
    if config.database() == DatabaseKind::Sqlite {
        lines.push("data/");
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
