//! HTTP Handlers

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Multipart, Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::AuthenticatedUser;
use auth::models::MessageResponse;

use crate::application::config::CatsConfig;
use crate::application::{
    AddPhotosUseCase, CatInput, CreateCatUseCase, DeleteCatUseCase, DeletePhotoUseCase,
    GetCatUseCase, GetPhotoUseCase, ListCatsUseCase, SetPrimaryPhotoUseCase, UpdateCatUseCase,
};
use crate::domain::entity::cat::CatFields;
use crate::domain::entity::photo::UploadReport;
use crate::domain::repository::{CatPhotoRepository, CatRepository, PhotoStorage};
use crate::domain::value_object::{
    CatId, PhotoId,
    cat_profile::{CatAge, CatDescription, CatName},
};
use crate::error::{CatsError, CatsResult};
use crate::presentation::dto::{
    CatResponse, CatSummaryResponse, CreateCatResponse, IdResponse, PhotoResponse,
    UpdateAgeRequest, UpdateCatRequest, UpdateCatResponse, UpdateDescriptionRequest,
    UpdateNameRequest, UploadResponse,
};
use crate::presentation::middleware::OwnedCat;
use crate::presentation::multipart::read_form;

/// Shared state for cats handlers
#[derive(Clone)]
pub struct CatsAppState<C, P, S>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    pub cats: Arc<C>,
    pub photos: Arc<P>,
    pub storage: Arc<S>,
    pub config: Arc<CatsConfig>,
}

fn multipart_error(rejection: MultipartRejection) -> CatsError {
    tracing::debug!(error = %rejection, "Multipart rejected");
    CatsError::InvalidForm("failed to parse multipart form".to_string())
}

/// 201 when anything was stored, else 500 if storage failed, else 400
fn upload_status(report: &UploadReport) -> StatusCode {
    if !report.uploaded.is_empty() {
        StatusCode::CREATED
    } else if report.has_server_failures() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_REQUEST
    }
}

// ============================================================================
// Reads
// ============================================================================

/// GET /api/auth/cat/all
pub async fn list_cats<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
) -> CatsResult<Json<Vec<CatSummaryResponse>>>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let cats = ListCatsUseCase::new(state.cats.clone()).execute().await?;

    Ok(Json(cats.into_iter().map(CatSummaryResponse::from).collect()))
}

/// GET /api/auth/cat/id/{id}
pub async fn get_cat<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Path(raw_id): Path<String>,
) -> CatsResult<Json<CatResponse>>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let cat_id: CatId = raw_id.parse()?;
    let cat = GetCatUseCase::new(state.cats.clone()).execute(cat_id).await?;

    Ok(Json(cat.into()))
}

/// GET /api/auth/cat/photo/{photo_id}
pub async fn get_photo<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Path(raw_id): Path<String>,
) -> CatsResult<Json<PhotoResponse>>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let photo_id: PhotoId = raw_id.parse()?;
    let photo = GetPhotoUseCase::new(state.photos.clone())
        .execute(photo_id)
        .await?;

    Ok(Json(photo.into()))
}

// ============================================================================
// Create (multipart)
// ============================================================================

/// POST /api/auth/cat/create
///
/// Text fields `name`, `age`, `description`; optional `files`.
pub async fn create_cat<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Extension(user): Extension<AuthenticatedUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> CatsResult<(StatusCode, Json<CreateCatResponse>)>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let multipart = multipart.map_err(multipart_error)?;
    let form = read_form(multipart, &state.config).await?;

    let fields = CatFields {
        name: CatName::new(form.required("name")?)?,
        age: CatAge::parse(form.required("age")?)?,
        description: CatDescription::new(form.required("description")?)?,
    };

    let output = CreateCatUseCase::new(
        state.cats.clone(),
        state.photos.clone(),
        state.storage.clone(),
        state.config.clone(),
    )
    .execute(user.user_id, fields, form.files)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCatResponse {
            id: output.cat_id.value(),
            photo: output.photos.into(),
        }),
    ))
}

// ============================================================================
// Updates (owner only)
// ============================================================================

/// PUT /api/auth/cat/mw/{id}
pub async fn update_cat<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Extension(OwnedCat(cat_id)): Extension<OwnedCat>,
    payload: Result<Json<UpdateCatRequest>, JsonRejection>,
) -> CatsResult<Json<UpdateCatResponse>>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let cat = UpdateCatUseCase::new(state.cats.clone())
        .replace(
            cat_id,
            CatInput {
                name: req.name,
                age: req.age,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(cat.into()))
}

/// PATCH /api/auth/cat/mw/{id}/name
pub async fn update_name<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Extension(OwnedCat(cat_id)): Extension<OwnedCat>,
    payload: Result<Json<UpdateNameRequest>, JsonRejection>,
) -> CatsResult<Json<IdResponse>>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    UpdateCatUseCase::new(state.cats.clone())
        .rename(cat_id, &req.name)
        .await?;

    Ok(Json(IdResponse { id: cat_id.value() }))
}

/// PATCH /api/auth/cat/mw/{id}/age
pub async fn update_age<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Extension(OwnedCat(cat_id)): Extension<OwnedCat>,
    payload: Result<Json<UpdateAgeRequest>, JsonRejection>,
) -> CatsResult<Json<IdResponse>>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    UpdateCatUseCase::new(state.cats.clone())
        .set_age(cat_id, req.age)
        .await?;

    Ok(Json(IdResponse { id: cat_id.value() }))
}

/// PATCH /api/auth/cat/mw/{id}/description
pub async fn update_description<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Extension(OwnedCat(cat_id)): Extension<OwnedCat>,
    payload: Result<Json<UpdateDescriptionRequest>, JsonRejection>,
) -> CatsResult<Json<IdResponse>>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    UpdateCatUseCase::new(state.cats.clone())
        .set_description(cat_id, req.description)
        .await?;

    Ok(Json(IdResponse { id: cat_id.value() }))
}

/// DELETE /api/auth/cat/mw/{id}
pub async fn delete_cat<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Extension(OwnedCat(cat_id)): Extension<OwnedCat>,
) -> CatsResult<Json<MessageResponse>>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    DeleteCatUseCase::new(
        state.cats.clone(),
        state.photos.clone(),
        state.storage.clone(),
    )
    .execute(cat_id)
    .await?;

    Ok(Json(MessageResponse::new("successfully deleted cat")))
}

// ============================================================================
// Photos (owner only)
// ============================================================================

/// POST /api/auth/cat/mw/{id}/photo/add
pub async fn add_photos<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Extension(OwnedCat(cat_id)): Extension<OwnedCat>,
    multipart: Result<Multipart, MultipartRejection>,
) -> CatsResult<(StatusCode, Json<UploadResponse>)>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let multipart = multipart.map_err(multipart_error)?;
    let form = read_form(multipart, &state.config).await?;

    let report = AddPhotosUseCase::new(
        state.photos.clone(),
        state.storage.clone(),
        state.config.clone(),
    )
    .execute(cat_id, form.files)
    .await?;

    Ok((upload_status(&report), Json(report.into())))
}

/// PATCH /api/auth/cat/mw/{id}/photo/{photo_id}/primary
pub async fn set_primary_photo<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Extension(OwnedCat(cat_id)): Extension<OwnedCat>,
    Path((_, raw_photo_id)): Path<(String, String)>,
) -> CatsResult<Json<IdResponse>>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let photo_id: PhotoId = raw_photo_id.parse()?;

    SetPrimaryPhotoUseCase::new(state.photos.clone())
        .execute(cat_id, photo_id)
        .await?;

    Ok(Json(IdResponse {
        id: photo_id.value(),
    }))
}

/// DELETE /api/auth/cat/mw/{id}/photo/{photo_id}
pub async fn delete_photo<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Extension(OwnedCat(cat_id)): Extension<OwnedCat>,
    Path((_, raw_photo_id)): Path<(String, String)>,
) -> CatsResult<Json<MessageResponse>>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let photo_id: PhotoId = raw_photo_id.parse()?;

    DeletePhotoUseCase::new(state.photos.clone(), state.storage.clone())
        .execute(cat_id, photo_id)
        .await?;

    Ok(Json(MessageResponse::new("successfully deleted photo")))
}
