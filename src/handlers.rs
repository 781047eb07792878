use crate::errors::AppError;
use crate::models::{
    CompleteRequest, CreateItemForm, CreateItemRequest, ExportSnapshot, Item, LogValueForm,
    NewItem, Sample, UpdateValueRequest,
};
use crate::state::AppState;
use crate::ui::render_index;
use crate::validation::parse_value;
use crate::view::{build_cards, ItemCard};
use crate::window::TimeWindow;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    #[serde(default)]
    pub window: TimeWindow,
}

pub async fn index(State(state): State<AppState>, Query(query): Query<WindowQuery>) -> Html<String> {
    let items = state.data.lock().await.list();
    Html(render_index(&build_cards(&items, query.window), query.window))
}

pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.data.lock().await.list())
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(data.get(&id)?.clone()))
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Sample>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(data.get(&id)?.history.clone()))
}

pub async fn get_cards(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Json<Vec<ItemCard>> {
    let items = state.data.lock().await.list();
    Json(build_cards(&items, query.window))
}

pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let Json(payload) = payload.map_err(bad_json)?;
    let new = NewItem::try_from(payload)?;
    Ok(Json(apply_create(&state, new).await?))
}

pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<CompleteRequest>>,
) -> Result<Json<Item>, AppError> {
    let note = payload.and_then(|Json(request)| request.note);
    let item = state
        .mutate(|data| data.complete_task(&id, note, Utc::now()))
        .await?;
    Ok(Json(item))
}

pub async fn update_value(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateValueRequest>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let Json(payload) = payload.map_err(bad_json)?;
    let item = state
        .mutate(|data| data.log_value(&id, payload.value, payload.note, Utc::now()))
        .await?;
    Ok(Json(item))
}

pub async fn export(State(state): State<AppState>) -> Json<ExportSnapshot> {
    Json(state.data.lock().await.export(Utc::now()))
}

pub async fn create_item_form(
    State(state): State<AppState>,
    Form(form): Form<CreateItemForm>,
) -> Result<Redirect, AppError> {
    let new = NewItem::parse(&form.name, &form.target, form.kind)?;
    apply_create(&state, new).await?;
    Ok(Redirect::to("/"))
}

pub async fn complete_task_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .mutate(|data| data.complete_task(&id, None, Utc::now()))
        .await?;
    Ok(Redirect::to("/"))
}

pub async fn log_value_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<LogValueForm>,
) -> Result<Redirect, AppError> {
    let value = parse_value(&form.value)?;
    state
        .mutate(|data| data.log_value(&id, value, None, Utc::now()))
        .await?;
    Ok(Redirect::to("/"))
}

async fn apply_create(state: &AppState, new: NewItem) -> Result<Item, AppError> {
    state
        .mutate(|data| Ok::<_, AppError>(data.create_item(new, Utc::now())))
        .await
}

fn bad_json(rejection: JsonRejection) -> AppError {
    AppError::bad_request(rejection.body_text())
}
