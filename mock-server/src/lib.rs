//! In-memory stand-in for the PassNinja API.
//!
//! Serves every route the client consumes. Templates are fixed at startup;
//! passes live in a shared map keyed by `(passType, serialNumber)`. Requests
//! without both credential headers are answered with 401.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const ACCOUNT_ID_HEADER: &str = "x-account-id";
pub const API_KEY_HEADER: &str = "x-api-key";

pub const DEMO_PASS_TYPE: &str = "demo.coupon";
pub const DEMO_TEMPLATE_ID: &str = "ptk_demo";

const LANDING_ORIGIN: &str = "https://mock.passninja.invalid";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassTemplate {
    pub id: String,
    pub name: String,
    pub pass_type: String,
    pub keys: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PassUrls {
    pub landing: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pass {
    pub pass_type: String,
    pub serial_number: String,
    pub urls: PassUrls,
    pub pass: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassInput {
    pub pass_type: String,
    #[serde(default)]
    pub pass: Map<String, Value>,
}

#[derive(Deserialize)]
pub struct DecryptInput {
    pub payload: String,
}

pub struct Store {
    templates: HashMap<String, PassTemplate>,
    passes: RwLock<HashMap<(String, String), Pass>>,
}

pub type Db = Arc<Store>;

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// The template served by `app()`: a coupon requiring a barcode and a description.
pub fn demo_template() -> PassTemplate {
    PassTemplate {
        id: DEMO_TEMPLATE_ID.to_string(),
        name: "Demo coupon".to_string(),
        pass_type: DEMO_PASS_TYPE.to_string(),
        keys: vec!["barcode".to_string(), "description".to_string()],
    }
}

pub fn app() -> Router {
    app_with_templates(vec![demo_template()])
}

pub fn app_with_templates(templates: Vec<PassTemplate>) -> Router {
    let db: Db = Arc::new(Store {
        templates: templates.into_iter().map(|t| (t.pass_type.clone(), t)).collect(),
        passes: RwLock::new(HashMap::new()),
    });
    Router::new()
        .route("/v1/passtypes/keys/{pass_type}", get(required_keys))
        .route("/v1/passes", post(create_pass))
        .route("/v1/passes/{pass_type}", get(find_passes))
        .route("/v1/passes/{pass_type}/decrypt", post(decrypt_pass))
        .route(
            "/v1/passes/{pass_type}/{serial_number}",
            get(get_pass).put(put_pass).delete(delete_pass),
        )
        .route("/v1/pass_templates/{id}", get(get_template))
        .layer(middleware::from_fn(require_credentials))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_credentials(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !has_header(request.headers(), ACCOUNT_ID_HEADER) || !has_header(request.headers(), API_KEY_HEADER) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

fn has_header(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.is_empty())
}

fn template<'a>(db: &'a Store, pass_type: &str) -> Result<&'a PassTemplate, ApiError> {
    db.templates
        .get(pass_type)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("unknown passType {pass_type}")))
}

fn ensure_string_values(data: &Map<String, Value>) -> Result<(), ApiError> {
    let invalid: Vec<&str> = data
        .iter()
        .filter(|(_, v)| !v.is_string())
        .map(|(k, _)| k.as_str())
        .collect();
    if invalid.is_empty() {
        return Ok(());
    }
    Err(api_error(
        StatusCode::BAD_REQUEST,
        format!("non-string values for: {}", invalid.join(", ")),
    ))
}

async fn required_keys(State(db): State<Db>, Path(pass_type): Path<String>) -> Result<Json<Value>, ApiError> {
    let template = template(&db, &pass_type)?;
    Ok(Json(json!({ "keys": template.keys })))
}

async fn create_pass(
    State(db): State<Db>,
    Json(input): Json<PassInput>,
) -> Result<(StatusCode, Json<Pass>), ApiError> {
    let template = template(&db, &input.pass_type)?;
    ensure_string_values(&input.pass)?;
    let missing: Vec<&str> = template
        .keys
        .iter()
        .filter(|k| !input.pass.contains_key(k.as_str()))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("missing required keys: {}", missing.join(", ")),
        ));
    }

    let serial_number = Uuid::new_v4().to_string();
    let pass = Pass {
        urls: PassUrls {
            landing: format!("{LANDING_ORIGIN}/{}/{serial_number}", input.pass_type),
        },
        pass_type: input.pass_type,
        serial_number,
        pass: input.pass,
    };
    info!(pass_type = %pass.pass_type, serial_number = %pass.serial_number, "issued pass");
    db.passes
        .write()
        .await
        .insert((pass.pass_type.clone(), pass.serial_number.clone()), pass.clone());
    Ok((StatusCode::CREATED, Json(pass)))
}

async fn find_passes(State(db): State<Db>, Path(pass_type): Path<String>) -> Result<Json<Value>, ApiError> {
    template(&db, &pass_type)?;
    let passes = db.passes.read().await;
    let mut found: Vec<&Pass> = passes.values().filter(|p| p.pass_type == pass_type).collect();
    found.sort_by(|a, b| a.serial_number.cmp(&b.serial_number));
    Ok(Json(json!({ "passes": found, "count": found.len() })))
}

async fn get_pass(
    State(db): State<Db>,
    Path((pass_type, serial_number)): Path<(String, String)>,
) -> Result<Json<Pass>, StatusCode> {
    let passes = db.passes.read().await;
    passes
        .get(&(pass_type, serial_number))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Merges the supplied fields into the stored pass. Required keys are not
/// re-checked, so partial updates succeed.
async fn put_pass(
    State(db): State<Db>,
    Path((pass_type, serial_number)): Path<(String, String)>,
    Json(input): Json<PassInput>,
) -> Result<Json<Pass>, ApiError> {
    ensure_string_values(&input.pass)?;
    let mut passes = db.passes.write().await;
    let pass = passes
        .get_mut(&(pass_type, serial_number))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "pass not found"))?;
    pass.pass.extend(input.pass);
    Ok(Json(pass.clone()))
}

async fn delete_pass(
    State(db): State<Db>,
    Path((pass_type, serial_number)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    let mut passes = db.passes.write().await;
    let removed = passes.remove(&(pass_type, serial_number));
    if let Some(pass) = &removed {
        info!(pass_type = %pass.pass_type, serial_number = %pass.serial_number, "deleted pass");
    }
    removed.map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

/// The mock "ciphertext" is the serial number of a pass of this type.
async fn decrypt_pass(
    State(db): State<Db>,
    Path(pass_type): Path<String>,
    Json(input): Json<DecryptInput>,
) -> Result<Json<Pass>, ApiError> {
    let passes = db.passes.read().await;
    passes
        .get(&(pass_type, input.payload))
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "payload does not match any pass"))
}

async fn get_template(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<PassTemplate>, StatusCode> {
    db.templates
        .values()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
