//! Source stubs of the backend service.
//!
//! The entry point is assembled from optional blocks; the smaller modules
//! keep one template per dialect.

use serde_yaml::Value;

use super::{Dialect, fill, join_blocks, yaml};
use crate::domain::{DatabaseKind, Feature, ProjectConfig};
use crate::error::{StackforgeError, StackforgeResult};

/// Every source file of the backend, as `(relative path, body)` pairs.
pub fn source_files(config: &ProjectConfig) -> StackforgeResult<Vec<(String, String)>> {
    let d = Dialect(config.backend_lang());
    let ext = d.ext();
    let mut files = vec![
        (format!("src/index.{ext}"), entry_point(config)),
        (format!("src/utils/http-error.{ext}"), http_error(d)),
        (
            format!("src/middlewares/error.middleware.{ext}"),
            error_middleware(config),
        ),
        (format!("src/models/task.model.{ext}"), task_model(d)),
        (format!("src/services/task.service.{ext}"), task_service(d)),
        (
            format!("src/controllers/task.controller.{ext}"),
            task_controller(d),
        ),
        (format!("src/routes/task.routes.{ext}"), task_routes(config)),
    ];

    if config.has(Feature::Logging) {
        files.push((format!("src/utils/logger.{ext}"), logger(d)));
    }
    if let Some(body) = database(config) {
        files.push((format!("src/config/database.{ext}"), body));
    }
    if config.has(Feature::Validation) {
        files.push((format!("src/validators/task.validator.{ext}"), task_validator(d)));
    }
    if config.has(Feature::Auth) {
        files.push((format!("src/services/auth.service.{ext}"), auth_service(d)));
        files.push((format!("src/middlewares/auth.middleware.{ext}"), auth_middleware(d)));
        files.push((format!("src/routes/auth.routes.{ext}"), auth_routes(d)));
    }
    if config.has(Feature::Docs) {
        files.push((format!("src/config/swagger.{ext}"), swagger_config(d)));
        files.push((OPENAPI_PATH.to_string(), openapi(config)?));
    }

    Ok(files)
}

// ── Entry point ──────────────────────────────────────────────────────────────

const ENTRY: &str = r#"{{IMPORTS}}
{{LOGGER_FALLBACK}}const app = express();
const PORT = Number(process.env.PORT) || {{PORT}};

app.use(helmet());
app.use(
  cors({
    origin: process.env.CORS_ORIGIN || '*',
    credentials: process.env.CORS_CREDENTIALS === 'true',
  }),
);
app.use(compression());
app.use(express.json());
app.use(express.urlencoded({ extended: true }));
{{MIDDLEWARE}}
app.get('/', {{INFO_PARAMS}} => {
  res.json({
    name: process.env.APP_NAME || '{{NAME}}',
    version: '1.0.0',
    health: '/health',{{DOCS_LINK}}
  });
});

app.get('/health', {{INFO_PARAMS}} => {
  res.json({ status: 'ok', uptime: process.uptime(), timestamp: new Date().toISOString() });
});

{{ROUTES}}
app.use(notFoundHandler);
app.use(errorHandler);

async function start(){{START_RET}} {
{{DB_CONNECT}}  {{LISTEN_BIND}}app.listen(PORT, () => {
    logger.info(`Server listening on http://localhost:${PORT}`);
  });
{{SHUTDOWN}}}

if (process.env.NODE_ENV !== 'test') {
  start().catch((err{{ERR_TY}}) => {
    logger.error('Failed to start server', err);
    process.exit(1);
  });
}

{{EXPORT}}
"#;

const RATE_LIMIT_BLOCK: &str = r#"app.use(
  '/api',
  rateLimit({
    windowMs: Number(process.env.RATE_LIMIT_WINDOW_MS) || 900000,
    max: Number(process.env.RATE_LIMIT_MAX) || 100,
    standardHeaders: true,
    legacyHeaders: false,
  }),
);
"#;

const SHUTDOWN_BLOCK: &str = r#"
  const shutdown = (signal{{SIG_TY}}) => {
    logger.info(`${signal} received, closing server`);
    server.close(() => process.exit(0));
    setTimeout(() => process.exit(1), 10000).unref();
  };
  process.on('SIGTERM', () => shutdown('SIGTERM'));
  process.on('SIGINT', () => shutdown('SIGINT'));
"#;

/// `src/index.{ts,js}`: middleware stack, routes, startup and shutdown.
pub fn entry_point(config: &ProjectConfig) -> String {
    let d = Dialect(config.backend_lang());
    let logging = config.has(Feature::Logging);
    let graceful = config.has(Feature::GracefulShutdown);

    let mut imports = vec![
        d.import_bare("dotenv/config"),
        d.import_default("express", "express"),
        d.import_types(&["Request", "Response"], "express"),
        d.import_default("cors", "cors"),
        d.import_default("helmet", "helmet"),
        d.import_default("compression", "compression"),
    ];
    if logging {
        imports.push(d.import_named(&["logger", "requestLogger"], "./utils/logger"));
    } else {
        imports.push(d.import_default("morgan", "morgan"));
    }
    if config.has(Feature::RateLimit) {
        imports.push(d.import_default("rateLimit", "express-rate-limit"));
    }
    if config.has_database() {
        imports.push(d.import_named(&["connectDatabase"], "./config/database"));
    }
    imports.push(d.import_named(&["taskRouter"], "./routes/task.routes"));
    if config.has(Feature::Auth) {
        imports.push(d.import_named(&["authRouter"], "./routes/auth.routes"));
    }
    if config.has(Feature::Docs) {
        imports.push(d.import_named(&["setupSwagger"], "./config/swagger"));
    }
    imports.push(d.import_named(
        &["errorHandler", "notFoundHandler"],
        "./middlewares/error.middleware",
    ));

    let request_logging = if logging {
        "app.use(requestLogger);\n".to_string()
    } else {
        "app.use(morgan(process.env.NODE_ENV === 'production' ? 'combined' : 'dev'));\n"
            .to_string()
    };
    let rate_limit = if config.has(Feature::RateLimit) {
        RATE_LIMIT_BLOCK
    } else {
        ""
    };
    let middleware = join_blocks([request_logging.as_str(), rate_limit]);

    let routes = join_blocks([
        if config.has(Feature::Auth) {
            "app.use('/api/auth', authRouter);"
        } else {
            ""
        },
        "app.use('/api/tasks', taskRouter);",
        if config.has(Feature::Docs) {
            "setupSwagger(app);"
        } else {
            ""
        },
    ]);

    let db_connect = if config.has_database() {
        "  await connectDatabase();\n  logger.info('Database connected');\n"
    } else {
        ""
    };
    let shutdown = if graceful {
        fill(SHUTDOWN_BLOCK, &[("SIG_TY", &d.ty("NodeJS.Signals"))])
    } else {
        String::new()
    };
    let logger_fallback = if logging { "" } else { "const logger = console;\n\n" };
    let docs_link = if config.has(Feature::Docs) {
        "\n    docs: '/api-docs',"
    } else {
        ""
    };
    let port = config.port().to_string();

    fill(
        ENTRY,
        &[
            ("IMPORTS", &join_blocks(&imports)),
            ("LOGGER_FALLBACK", logger_fallback),
            ("PORT", &port),
            ("MIDDLEWARE", &middleware),
            ("INFO_PARAMS", &d.params(&[("_req", "Request"), ("res", "Response")])),
            ("NAME", config.name()),
            ("DOCS_LINK", docs_link),
            ("ROUTES", &routes),
            ("START_RET", &d.ty("Promise<void>")),
            ("DB_CONNECT", db_connect),
            ("LISTEN_BIND", if graceful { "const server = " } else { "" }),
            ("SHUTDOWN", &shutdown),
            ("ERR_TY", &d.ty("unknown")),
            ("EXPORT", &d.export_named(&["app"])),
        ],
    )
}

// ── Logger ───────────────────────────────────────────────────────────────────

const LOGGER: &str = r#"{{IMPORTS}}

const logDir = process.env.LOG_DIR || 'logs';

const rotate = (filename{{STR}}, level{{OPT_STR}}) =>
  new DailyRotateFile({
    dirname: logDir,
    filename,
    level,
    datePattern: 'YYYY-MM-DD',
    zippedArchive: true,
    maxSize: '20m',
    maxFiles: '14d',
  });

const logger = winston.createLogger({
  level: process.env.LOG_LEVEL || 'info',
  silent: process.env.NODE_ENV === 'test',
  format: winston.format.combine(
    winston.format.timestamp(),
    winston.format.errors({ stack: true }),
    winston.format.json(),
  ),
  transports: [rotate('error-%DATE%.log', 'error'), rotate('combined-%DATE%.log')],
});

if (process.env.NODE_ENV !== 'production') {
  logger.add(
    new winston.transports.Console({
      format: winston.format.combine(winston.format.colorize(), winston.format.simple()),
    }),
  );
}

function requestLogger{{MW_PARAMS}}{{VOID}} {
  const started = process.hrtime.bigint();
  res.on('finish', () => {
    const ms = Number(process.hrtime.bigint() - started) / 1e6;
    logger.http(`${req.method} ${req.originalUrl} ${res.statusCode} ${ms.toFixed(1)}ms`);
  });
  next();
}

{{EXPORT}}
"#;

fn logger(d: Dialect) -> String {
    let imports = join_blocks([
        d.import_default("winston", "winston"),
        d.import_default("DailyRotateFile", "winston-daily-rotate-file"),
        d.import_types(&["NextFunction", "Request", "Response"], "express"),
    ]);
    fill(
        LOGGER,
        &[
            ("IMPORTS", imports.trim_end()),
            ("STR", &d.ty("string")),
            ("OPT_STR", &if d.is_ts() { "?: string".to_string() } else { String::new() }),
            ("MW_PARAMS", &middleware_params(d)),
            ("VOID", &d.ty("void")),
            ("EXPORT", &d.export_named(&["logger", "requestLogger"])),
        ],
    )
}

fn middleware_params(d: Dialect) -> String {
    d.params(&[
        ("req", "Request"),
        ("res", "Response"),
        ("next", "NextFunction"),
    ])
}

// ── Database ─────────────────────────────────────────────────────────────────

const SQL_PARAM_TYPE: &str = "type SqlParam = string | number | boolean | null;\n\n";

/// `src/config/database`: a uniform `connectDatabase` / `query` pair shaped
/// for the configured database. `None` without a database.
pub fn database(config: &ProjectConfig) -> Option<String> {
    let d = Dialect(config.backend_lang());
    let ts = d.is_ts();
    let generic = if ts { "<T = unknown>" } else { "" };
    let rows = if ts { "Promise<T[]>" } else { "" };
    let ret = |ty: &str| d.ty(ty);
    let params_ty = if ts { ": SqlParam[]" } else { "" };
    let param_alias = if ts { SQL_PARAM_TYPE } else { "" };
    let cast = if ts { " as unknown as T[]" } else { "" };

    let body = match config.database() {
        DatabaseKind::None => return None,
        DatabaseKind::Postgres => format!(
            "{import}\n\n{param_alias}const pool = new Pool({{ connectionString: process.env.DATABASE_URL }});\n\n\
async function connectDatabase(){void} {{\n  const client = await pool.connect();\n  client.release();\n}}\n\n\
async function query{generic}(text{str}, params{params_ty} = []){rows_ret} {{\n  const result = await pool.query(text, params);\n  return result.rows{cast};\n}}\n\n{export}\n",
            import = d.import_named(&["Pool"], "pg"),
            void = ret("Promise<void>"),
            str = ret("string"),
            rows_ret = if ts { format!(": {rows}") } else { String::new() },
            export = d.export_named(&["pool", "connectDatabase", "query"]),
        ),
        DatabaseKind::Mysql => format!(
            "{import}\n\n{param_alias}const pool = mysql.createPool(process.env.DATABASE_URL || '');\n\n\
async function connectDatabase(){void} {{\n  const connection = await pool.getConnection();\n  connection.release();\n}}\n\n\
async function query{generic}(sql{str}, params{params_ty} = []){rows_ret} {{\n  const [result] = await pool.execute(sql, params);\n  return result{cast};\n}}\n\n{export}\n",
            import = d.import_default("mysql", "mysql2/promise"),
            void = ret("Promise<void>"),
            str = ret("string"),
            rows_ret = if ts { format!(": {rows}") } else { String::new() },
            export = d.export_named(&["pool", "connectDatabase", "query"]),
        ),
        DatabaseKind::Mongodb => format!(
            "{import}\n\n\
async function connectDatabase(){void} {{\n  await mongoose.connect(process.env.DATABASE_URL || '');\n}}\n\n\
async function query{generic}(collection{str}, filter{filter_ty} = {{}}){rows_ret} {{\n  const docs = await mongoose.connection.collection(collection).find(filter).toArray();\n  return docs{cast};\n}}\n\n{export}\n",
            import = d.import_default("mongoose", "mongoose"),
            void = ret("Promise<void>"),
            str = ret("string"),
            filter_ty = ret("Record<string, unknown>"),
            rows_ret = if ts { format!(": {rows}") } else { String::new() },
            export = d.export_named(&["mongoose", "connectDatabase", "query"]),
        ),
        DatabaseKind::Sqlite => format!(
            "{imports}\n\n{param_alias}const file = (process.env.DATABASE_URL || 'file:./data/app.sqlite').replace(/^file:/, '');\n\
let db{db_ty};\n\n\
async function connectDatabase(){void} {{\n  fs.mkdirSync(path.dirname(file), {{ recursive: true }});\n  db = new Database(file);\n  db.pragma('journal_mode = WAL');\n}}\n\n\
async function query{generic}(sql{str}, params{params_ty} = []){rows_ret} {{\n  if (!db) {{\n    throw new Error('Database not connected');\n  }}\n  return db.prepare(sql).all(...params){cast};\n}}\n\n{export}\n",
            imports = join_blocks([
                d.import_default("fs", "fs"),
                d.import_default("path", "path"),
                d.import_default("Database", "better-sqlite3"),
            ])
            .trim_end(),
            db_ty = ret("Database.Database | undefined"),
            void = ret("Promise<void>"),
            str = ret("string"),
            rows_ret = if ts { format!(": {rows}") } else { String::new() },
            export = d.export_named(&["connectDatabase", "query"]),
        ),
    };
    Some(body)
}

// ── Errors ───────────────────────────────────────────────────────────────────

const HTTP_ERROR_TS: &str = r#"export class HttpError extends Error {
  constructor(
    public readonly status: number,
    message: string,
    public readonly details?: unknown,
  ) {
    super(message);
    this.name = 'HttpError';
  }
}
"#;

const HTTP_ERROR_JS: &str = r#"class HttpError extends Error {
  constructor(status, message, details) {
    super(message);
    this.name = 'HttpError';
    this.status = status;
    this.details = details;
  }
}

module.exports = { HttpError };
"#;

fn http_error(d: Dialect) -> String {
    let body = if d.is_ts() { HTTP_ERROR_TS } else { HTTP_ERROR_JS };
    body.to_string()
}

const ERROR_MIDDLEWARE: &str = r#"{{IMPORTS}}

function notFoundHandler{{NOT_FOUND_PARAMS}}{{VOID}} {
  next(new HttpError(404, `Route ${req.method} ${req.originalUrl} not found`));
}

function errorHandler{{ERROR_PARAMS}}{{VOID}} {
  const status = err instanceof HttpError ? err.status : {{STATUS_FALLBACK}};
  if (status >= 500) {
    logger.error(err.message, { stack: err.stack });
  }
  const hideDetails = status >= 500 && process.env.NODE_ENV === 'production';
  res.status(status).json({
    error: {
      message: hideDetails ? 'Internal Server Error' : err.message,
      ...(err instanceof HttpError && err.details ? { details: err.details } : {}),
    },
  });
}

{{EXPORT}}
"#;

fn error_middleware(config: &ProjectConfig) -> String {
    let d = Dialect(config.backend_lang());
    let logger = if config.has(Feature::Logging) {
        d.import_named(&["logger"], "../utils/logger")
    } else {
        "\nconst logger = console;".to_string()
    };
    let imports = join_blocks([
        d.import_types(&["NextFunction", "Request", "Response"], "express"),
        d.import_named(&["HttpError"], "../utils/http-error"),
        logger,
    ]);
    let status_fallback = if d.is_ts() {
        "((err as { status?: number }).status ?? 500)"
    } else {
        "(err.status ?? 500)"
    };
    fill(
        ERROR_MIDDLEWARE,
        &[
            ("IMPORTS", imports.trim_end()),
            (
                "NOT_FOUND_PARAMS",
                &d.params(&[("req", "Request"), ("_res", "Response"), ("next", "NextFunction")]),
            ),
            (
                "ERROR_PARAMS",
                &d.params(&[
                    ("err", "Error"),
                    ("_req", "Request"),
                    ("res", "Response"),
                    ("_next", "NextFunction"),
                ]),
            ),
            ("VOID", &d.ty("void")),
            ("STATUS_FALLBACK", status_fallback),
            ("EXPORT", &d.export_named(&["errorHandler", "notFoundHandler"])),
        ],
    )
}

// ── Task resource ────────────────────────────────────────────────────────────

const TASK_MODEL_TS: &str = r#"export interface Task {
  id: string;
  title: string;
  completed: boolean;
  createdAt: string;
  updatedAt: string;
}

export interface CreateTaskInput {
  title: string;
}

export interface UpdateTaskInput {
  title?: string;
  completed?: boolean;
}
"#;

const TASK_MODEL_JS: &str = r#"/**
 * @typedef {Object} Task
 * @property {string} id
 * @property {string} title
 * @property {boolean} completed
 * @property {string} createdAt
 * @property {string} updatedAt
 */

/**
 * @typedef {Object} CreateTaskInput
 * @property {string} title
 */

/**
 * @typedef {Object} UpdateTaskInput
 * @property {string} [title]
 * @property {boolean} [completed]
 */

module.exports = {};
"#;

fn task_model(d: Dialect) -> String {
    let body = if d.is_ts() { TASK_MODEL_TS } else { TASK_MODEL_JS };
    body.to_string()
}

const TASK_SERVICE_TS: &str = r#"import { randomUUID } from 'crypto';
import type { CreateTaskInput, Task, UpdateTaskInput } from '../models/task.model';

export class TaskService {
  private readonly tasks = new Map<string, Task>();

  list(): Task[] {
    return [...this.tasks.values()];
  }

  get(id: string): Task | undefined {
    return this.tasks.get(id);
  }

  create(input: CreateTaskInput): Task {
    const now = new Date().toISOString();
    const task: Task = {
      id: randomUUID(),
      title: input.title.trim(),
      completed: false,
      createdAt: now,
      updatedAt: now,
    };
    this.tasks.set(task.id, task);
    return task;
  }

  update(id: string, input: UpdateTaskInput): Task | undefined {
    const existing = this.tasks.get(id);
    if (!existing) {
      return undefined;
    }
    const updated: Task = {
      ...existing,
      title: typeof input.title === 'string' ? input.title.trim() : existing.title,
      completed: typeof input.completed === 'boolean' ? input.completed : existing.completed,
      updatedAt: new Date().toISOString(),
    };
    this.tasks.set(id, updated);
    return updated;
  }

  remove(id: string): boolean {
    return this.tasks.delete(id);
  }

  clear(): void {
    this.tasks.clear();
  }
}

export const taskService = new TaskService();
"#;

const TASK_SERVICE_JS: &str = r#"const { randomUUID } = require('crypto');

class TaskService {
  constructor() {
    /** @type {Map<string, import('../models/task.model').Task>} */
    this.tasks = new Map();
  }

  list() {
    return [...this.tasks.values()];
  }

  get(id) {
    return this.tasks.get(id);
  }

  create(input) {
    const now = new Date().toISOString();
    const task = {
      id: randomUUID(),
      title: input.title.trim(),
      completed: false,
      createdAt: now,
      updatedAt: now,
    };
    this.tasks.set(task.id, task);
    return task;
  }

  update(id, input) {
    const existing = this.tasks.get(id);
    if (!existing) {
      return undefined;
    }
    const updated = {
      ...existing,
      title: typeof input.title === 'string' ? input.title.trim() : existing.title,
      completed: typeof input.completed === 'boolean' ? input.completed : existing.completed,
      updatedAt: new Date().toISOString(),
    };
    this.tasks.set(id, updated);
    return updated;
  }

  remove(id) {
    return this.tasks.delete(id);
  }

  clear() {
    this.tasks.clear();
  }
}

const taskService = new TaskService();

module.exports = { TaskService, taskService };
"#;

fn task_service(d: Dialect) -> String {
    let body = if d.is_ts() { TASK_SERVICE_TS } else { TASK_SERVICE_JS };
    body.to_string()
}

const TASK_CONTROLLER: &str = r#"{{IMPORTS}}

function listTasks{{LIST_PARAMS}}{{VOID}} {
  res.json(taskService.list());
}

function getTask{{PARAMS}}{{VOID}} {
  const task = taskService.get(req.params.id);
  if (!task) {
    next(new HttpError(404, 'Task not found'));
    return;
  }
  res.json(task);
}

function createTask{{PARAMS}}{{VOID}} {
  const title = req.body?.title;
  if (typeof title !== 'string' || title.trim().length === 0) {
    next(new HttpError(400, 'title is required'));
    return;
  }
  res.status(201).json(taskService.create({ title }));
}

function updateTask{{PARAMS}}{{VOID}} {
  const { title, completed } = req.body ?? {};
  const task = taskService.update(req.params.id, { title, completed });
  if (!task) {
    next(new HttpError(404, 'Task not found'));
    return;
  }
  res.json(task);
}

function deleteTask{{PARAMS}}{{VOID}} {
  if (!taskService.remove(req.params.id)) {
    next(new HttpError(404, 'Task not found'));
    return;
  }
  res.status(204).end();
}

{{EXPORT}}
"#;

fn task_controller(d: Dialect) -> String {
    let imports = join_blocks([
        d.import_types(&["NextFunction", "Request", "Response"], "express"),
        d.import_named(&["taskService"], "../services/task.service"),
        d.import_named(&["HttpError"], "../utils/http-error"),
    ]);
    fill(
        TASK_CONTROLLER,
        &[
            ("IMPORTS", imports.trim_end()),
            ("LIST_PARAMS", &d.params(&[("_req", "Request"), ("res", "Response")])),
            ("PARAMS", &middleware_params(d)),
            ("VOID", &d.ty("void")),
            (
                "EXPORT",
                &d.export_named(&["createTask", "deleteTask", "getTask", "listTasks", "updateTask"]),
            ),
        ],
    )
}

fn task_routes(config: &ProjectConfig) -> String {
    let d = Dialect(config.backend_lang());
    let validation = config.has(Feature::Validation);
    let imports = join_blocks([
        d.import_named(&["Router"], "express"),
        d.import_named(
            &["createTask", "deleteTask", "getTask", "listTasks", "updateTask"],
            "../controllers/task.controller",
        ),
        if validation {
            d.import_named(
                &["createTaskSchema", "updateTaskSchema", "validate"],
                "../validators/task.validator",
            )
        } else {
            String::new()
        },
    ]);
    let (create_mw, update_mw) = if validation {
        ("validate(createTaskSchema), ", "validate(updateTaskSchema), ")
    } else {
        ("", "")
    };

    format!(
        "{imports}\nconst taskRouter = Router();\n\n\
taskRouter.get('/', listTasks);\n\
taskRouter.get('/:id', getTask);\n\
taskRouter.post('/', {create_mw}createTask);\n\
taskRouter.patch('/:id', {update_mw}updateTask);\n\
taskRouter.delete('/:id', deleteTask);\n\n{}\n",
        d.export_named(&["taskRouter"])
    )
}

const ZOD_VALIDATOR: &str = r#"import { z, type ZodSchema } from 'zod';
import type { NextFunction, Request, Response } from 'express';
import { HttpError } from '../utils/http-error';

export const createTaskSchema = z.object({
  title: z.string().trim().min(1).max(200),
});

export const updateTaskSchema = z
  .object({
    title: z.string().trim().min(1).max(200).optional(),
    completed: z.boolean().optional(),
  })
  .refine((value) => Object.keys(value).length > 0, { message: 'Nothing to update' });

export function validate(schema: ZodSchema) {
  return (req: Request, _res: Response, next: NextFunction): void => {
    const result = schema.safeParse(req.body);
    if (!result.success) {
      next(new HttpError(400, 'Validation failed', result.error.flatten()));
      return;
    }
    req.body = result.data;
    next();
  };
}
"#;

const JOI_VALIDATOR: &str = r#"const Joi = require('joi');
const { HttpError } = require('../utils/http-error');

const createTaskSchema = Joi.object({
  title: Joi.string().trim().min(1).max(200).required(),
});

const updateTaskSchema = Joi.object({
  title: Joi.string().trim().min(1).max(200),
  completed: Joi.boolean(),
}).min(1);

function validate(schema) {
  return (req, _res, next) => {
    const { error, value } = schema.validate(req.body, { abortEarly: false, stripUnknown: true });
    if (error) {
      next(new HttpError(400, 'Validation failed', error.details.map((d) => d.message)));
      return;
    }
    req.body = value;
    next();
  };
}

module.exports = { createTaskSchema, updateTaskSchema, validate };
"#;

/// zod for TypeScript, joi for JavaScript, matching the manifest.
fn task_validator(d: Dialect) -> String {
    let body = if d.is_ts() { ZOD_VALIDATOR } else { JOI_VALIDATOR };
    body.to_string()
}

// ── Auth ─────────────────────────────────────────────────────────────────────

const AUTH_SERVICE_TS: &str = r#"import { randomUUID } from 'crypto';
import bcrypt from 'bcryptjs';
import jwt from 'jsonwebtoken';
import { HttpError } from '../utils/http-error';

interface User {
  id: string;
  email: string;
  passwordHash: string;
}

export interface TokenPair {
  accessToken: string;
  refreshToken: string;
}

const users = new Map<string, User>();

function secret(): string {
  return process.env.JWT_SECRET || 'change-me-to-a-long-random-string';
}

function issueTokens(user: User): TokenPair {
  const claims = { sub: user.id, email: user.email };
  return {
    accessToken: jwt.sign(claims, secret(), { expiresIn: process.env.JWT_EXPIRES_IN || '15m' }),
    refreshToken: jwt.sign(claims, secret(), {
      expiresIn: process.env.JWT_REFRESH_EXPIRES_IN || '7d',
    }),
  };
}

export async function register(email: string, password: string): Promise<TokenPair> {
  if (users.has(email)) {
    throw new HttpError(409, 'Email already registered');
  }
  const user: User = { id: randomUUID(), email, passwordHash: await bcrypt.hash(password, 10) };
  users.set(email, user);
  return issueTokens(user);
}

export async function login(email: string, password: string): Promise<TokenPair> {
  const user = users.get(email);
  if (!user || !(await bcrypt.compare(password, user.passwordHash))) {
    throw new HttpError(401, 'Invalid credentials');
  }
  return issueTokens(user);
}
"#;

const AUTH_SERVICE_JS: &str = r#"const { randomUUID } = require('crypto');
const bcrypt = require('bcryptjs');
const jwt = require('jsonwebtoken');
const { HttpError } = require('../utils/http-error');

const users = new Map();

function secret() {
  return process.env.JWT_SECRET || 'change-me-to-a-long-random-string';
}

function issueTokens(user) {
  const claims = { sub: user.id, email: user.email };
  return {
    accessToken: jwt.sign(claims, secret(), { expiresIn: process.env.JWT_EXPIRES_IN || '15m' }),
    refreshToken: jwt.sign(claims, secret(), {
      expiresIn: process.env.JWT_REFRESH_EXPIRES_IN || '7d',
    }),
  };
}

async function register(email, password) {
  if (users.has(email)) {
    throw new HttpError(409, 'Email already registered');
  }
  const user = { id: randomUUID(), email, passwordHash: await bcrypt.hash(password, 10) };
  users.set(email, user);
  return issueTokens(user);
}

async function login(email, password) {
  const user = users.get(email);
  if (!user || !(await bcrypt.compare(password, user.passwordHash))) {
    throw new HttpError(401, 'Invalid credentials');
  }
  return issueTokens(user);
}

module.exports = { register, login };
"#;

fn auth_service(d: Dialect) -> String {
    let body = if d.is_ts() { AUTH_SERVICE_TS } else { AUTH_SERVICE_JS };
    body.to_string()
}

fn auth_middleware(d: Dialect) -> String {
    format!(
        "{}\n\nconst requireAuth = expressjwt({{\n  secret: process.env.JWT_SECRET || 'change-me-to-a-long-random-string',\n  algorithms: ['HS256'],\n}});\n\n{}\n",
        d.import_named(&["expressjwt"], "express-jwt"),
        d.export_named(&["requireAuth"])
    )
}

const AUTH_ROUTES: &str = r#"{{IMPORTS}}

const authRouter = Router();

authRouter.post('/register', async {{PARAMS}} => {
  try {
    const { email, password } = req.body ?? {};
    if (typeof email !== 'string' || typeof password !== 'string' || password.length < 8) {
      res.status(400).json({ error: { message: 'email and a password of 8+ characters required' } });
      return;
    }
    res.status(201).json(await register(email, password));
  } catch (err) {
    next(err);
  }
});

authRouter.post('/login', async {{PARAMS}} => {
  try {
    const { email, password } = req.body ?? {};
    res.json(await login(String(email), String(password)));
  } catch (err) {
    next(err);
  }
});

authRouter.get('/me', requireAuth, {{ME_PARAMS}} => {
  res.json({ user: {{AUTH_CLAIMS}} });
});

{{EXPORT}}
"#;

fn auth_routes(d: Dialect) -> String {
    let imports = join_blocks([
        d.import_named(&["Router"], "express"),
        d.import_types(&["NextFunction", "Request", "Response"], "express"),
        d.import_types(&["Request as JWTRequest"], "express-jwt"),
        d.import_named(&["login", "register"], "../services/auth.service"),
        d.import_named(&["requireAuth"], "../middlewares/auth.middleware"),
    ]);
    fill(
        AUTH_ROUTES,
        &[
            ("IMPORTS", imports.trim_end()),
            ("PARAMS", &middleware_params(d)),
            ("ME_PARAMS", &d.params(&[("req", "Request"), ("res", "Response")])),
            (
                "AUTH_CLAIMS",
                if d.is_ts() {
                    "(req as JWTRequest).auth"
                } else {
                    "req.auth"
                },
            ),
            ("EXPORT", &d.export_named(&["authRouter"])),
        ],
    )
}

// ── API docs ─────────────────────────────────────────────────────────────────

const SWAGGER: &str = r#"{{IMPORTS}}

const definition = YAML.load(path.join(__dirname, '..', '..', 'docs', 'openapi.yaml'));
const spec = swaggerJsdoc({
  definition,
  apis: [path.join(__dirname, '..', 'routes', '*.{ts,js}')],
});

function setupSwagger{{PARAMS}}{{VOID}} {
  app.use('/api-docs', swaggerUi.serve, swaggerUi.setup(spec));
}

{{EXPORT}}
"#;

fn swagger_config(d: Dialect) -> String {
    let imports = join_blocks([
        d.import_default("path", "path"),
        d.import_types(&["Express"], "express"),
        d.import_default("swaggerJsdoc", "swagger-jsdoc"),
        d.import_default("swaggerUi", "swagger-ui-express"),
        d.import_default("YAML", "yamljs"),
    ]);
    fill(
        SWAGGER,
        &[
            ("IMPORTS", imports.trim_end()),
            ("PARAMS", &d.params(&[("app", "Express")])),
            ("VOID", &d.ty("void")),
            ("EXPORT", &d.export_named(&["setupSwagger"])),
        ],
    )
}

pub const OPENAPI_PATH: &str = "docs/openapi.yaml";

// `info` and `servers` are placeholders replaced with values in [`openapi`].
const OPENAPI: &str = r#"openapi: 3.0.3
info: {}
servers: []
paths:
  /health:
    get:
      summary: Liveness check
      responses:
        '200':
          description: Service is up
  /api/tasks:
    get:
      summary: List tasks
      responses:
        '200':
          description: All tasks
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/Task'
    post:
      summary: Create a task
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/CreateTask'
      responses:
        '201':
          description: Created
        '400':
          description: Invalid input
  /api/tasks/{id}:
    parameters:
      - name: id
        in: path
        required: true
        schema:
          type: string
    get:
      summary: Get a task
      responses:
        '200':
          description: The task
        '404':
          description: Not found
    patch:
      summary: Update a task
      responses:
        '200':
          description: Updated
        '404':
          description: Not found
    delete:
      summary: Delete a task
      responses:
        '204':
          description: Deleted
        '404':
          description: Not found
{{AUTH_PATHS}}components:
  schemas:
    Task:
      type: object
      properties:
        id:
          type: string
        title:
          type: string
        completed:
          type: boolean
        createdAt:
          type: string
          format: date-time
        updatedAt:
          type: string
          format: date-time
    CreateTask:
      type: object
      required: [title]
      properties:
        title:
          type: string
{{SECURITY}}"#;

const OPENAPI_AUTH_PATHS: &str = r#"  /api/auth/register:
    post:
      summary: Register and receive tokens
      responses:
        '201':
          description: Registered
  /api/auth/login:
    post:
      summary: Exchange credentials for tokens
      responses:
        '200':
          description: Tokens issued
        '401':
          description: Invalid credentials
  /api/auth/me:
    get:
      summary: Current user claims
      security:
        - bearerAuth: []
      responses:
        '200':
          description: Claims of the bearer token
        '401':
          description: Missing or invalid token
"#;

const OPENAPI_SECURITY: &str = r#"  securitySchemes:
    bearerAuth:
      type: http
      scheme: bearer
      bearerFormat: JWT
"#;

/// `docs/openapi.yaml`, the base document the swagger setup loads.
pub fn openapi(config: &ProjectConfig) -> StackforgeResult<String> {
    let auth = config.has(Feature::Auth);
    let skeleton = fill(
        OPENAPI,
        &[
            ("AUTH_PATHS", if auth { OPENAPI_AUTH_PATHS } else { "" }),
            ("SECURITY", if auth { OPENAPI_SECURITY } else { "" }),
        ],
    );
    let mut doc = yaml::parse(&skeleton, OPENAPI_PATH)?;
    let Value::Mapping(root) = &mut doc else {
        return Err(StackforgeError::Internal {
            message: format!("{OPENAPI_PATH} skeleton is not a mapping"),
        });
    };
    root.insert(
        "info".into(),
        yaml::map([
            ("title", config.name().into()),
            ("description", config.description().into()),
            ("version", "1.0.0".into()),
        ]),
    );
    root.insert(
        "servers".into(),
        yaml::seq([yaml::map([(
            "url",
            format!("http://localhost:{}", config.port()).into(),
        )])]),
    );
    yaml::render(&doc, OPENAPI_PATH)
}
