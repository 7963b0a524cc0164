//! MediScribe REST API server.
//!
//! ## Purpose
//! HTTP surface for prescription records and reminder links: list, fetch and
//! delete stored prescriptions, create new ones from upstream-extracted
//! medicine data, and derive Google Calendar reminder links.
//!
//! Authentication and the vision-model extraction itself are handled by
//! external collaborators; this server only exposes the stored records and
//! the schedule interpretation.

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use mediscribe_core::schedule::{build_reminder, resolve_slots, resolve_timing};
use mediscribe_core::{
    CoreConfig, FileStore, Medicine, MedicineType, Prescription, PrescriptionStore, StoreError,
};
use mediscribe_types::{DurationDays, NonEmptyText};

mod dto;

use dto::{
    CreatePrescriptionReq, CreatePrescriptionRes, DeletePrescriptionRes, HealthRes, MedicineDto,
    PrescriptionDto, ReminderReq, ReminderRes,
};

/// Application state for the REST API server.
///
/// Contains shared state that needs to be accessible to all request handlers:
/// the prescription store, constructed once at startup.
#[derive(Clone)]
struct AppState {
    store: Arc<FileStore>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_prescriptions,
        create_prescription,
        get_prescription,
        delete_prescription,
        get_prescription_medicines,
        create_reminder,
    ),
    components(schemas(
        HealthRes,
        MedicineDto,
        PrescriptionDto,
        CreatePrescriptionReq,
        CreatePrescriptionRes,
        DeletePrescriptionRes,
        ReminderReq,
        ReminderRes,
    ))
)]
struct ApiDoc;

/// Main entry point for the MediScribe REST API server.
///
/// # Environment Variables
/// - `MEDISCRIBE_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `MEDISCRIBE_DATA_DIR`: Prescription data directory (default: "/prescription_data")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the data directory does not exist,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mediscribe_api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDISCRIBE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting MediScribe REST API on {}", addr);

    let data_dir =
        std::env::var("MEDISCRIBE_DATA_DIR").unwrap_or_else(|_| "/prescription_data".into());
    let data_path = Path::new(&data_dir);
    if !data_path.exists() {
        anyhow::bail!("Data directory does not exist: {}", data_path.display());
    }

    let cfg = Arc::new(CoreConfig::new(data_path.to_path_buf())?);
    let state = AppState {
        store: Arc::new(FileStore::new(cfg)),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/prescriptions", get(list_prescriptions))
        .route("/prescriptions", post(create_prescription))
        .route("/prescriptions/:id", get(get_prescription))
        .route("/prescriptions/:id", delete(delete_prescription))
        .route("/prescriptions/:id/medicines", get(get_prescription_medicines))
        .route("/reminders", post(create_reminder))
        .merge(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used for monitoring and load balancer checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "MediScribe REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/prescriptions",
    responses(
        (status = 200, description = "List of prescriptions", body = [PrescriptionDto])
    )
)]
/// List all stored prescriptions, newest first.
#[axum::debug_handler]
async fn list_prescriptions(State(state): State<AppState>) -> Json<Vec<PrescriptionDto>> {
    let prescriptions = state
        .store
        .list()
        .into_iter()
        .map(PrescriptionDto::from)
        .collect();
    Json(prescriptions)
}

#[utoipa::path(
    post,
    path = "/prescriptions",
    request_body = CreatePrescriptionReq,
    responses(
        (status = 201, description = "Prescription created", body = CreatePrescriptionRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Create a prescription record from upstream-extracted medicine data.
///
/// # Errors
/// Returns `400 Bad Request` if a medicine entry cannot be converted (for
/// example a blank medicine name), and `500 Internal Server Error` if the
/// record cannot be written.
#[axum::debug_handler]
async fn create_prescription(
    State(state): State<AppState>,
    Json(req): Json<CreatePrescriptionReq>,
) -> Result<(StatusCode, Json<CreatePrescriptionRes>), (StatusCode, &'static str)> {
    let medicines = match req
        .medicines
        .into_iter()
        .map(Medicine::try_from)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(medicines) => medicines,
        Err(e) => {
            tracing::error!("Invalid medicine entry: {:?}", e);
            return Err((StatusCode::BAD_REQUEST, "Invalid medicine entry"));
        }
    };

    let mut prescription = Prescription::new(req.image_url, medicines);
    prescription.doctor_name = req.doctor_name;
    prescription.patient_name = req.patient_name;
    prescription.notes = req.notes;

    match state.store.save(&prescription) {
        Ok(()) => Ok((
            StatusCode::CREATED,
            Json(CreatePrescriptionRes {
                id: prescription.id,
            }),
        )),
        Err(e) => {
            tracing::error!("Save prescription error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/prescriptions/{id}",
    responses(
        (status = 200, description = "Prescription retrieved", body = PrescriptionDto),
        (status = 404, description = "Prescription not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Fetch one prescription by id.
#[axum::debug_handler]
async fn get_prescription(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<uuid::Uuid>,
) -> Result<Json<PrescriptionDto>, (StatusCode, &'static str)> {
    match state.store.get(id) {
        Ok(prescription) => Ok(Json(PrescriptionDto::from(prescription))),
        Err(StoreError::NotFound(_)) => {
            Err((StatusCode::NOT_FOUND, "Prescription not found"))
        }
        Err(e) => {
            tracing::error!("Get prescription error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/prescriptions/{id}",
    responses(
        (status = 200, description = "Prescription deleted", body = DeletePrescriptionRes),
        (status = 404, description = "Prescription not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Delete one prescription by id.
#[axum::debug_handler]
async fn delete_prescription(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<uuid::Uuid>,
) -> Result<Json<DeletePrescriptionRes>, (StatusCode, &'static str)> {
    match state.store.delete(id) {
        Ok(()) => Ok(Json(DeletePrescriptionRes { success: true })),
        Err(StoreError::NotFound(_)) => {
            Err((StatusCode::NOT_FOUND, "Prescription not found"))
        }
        Err(e) => {
            tracing::error!("Delete prescription error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/prescriptions/{id}/medicines",
    responses(
        (status = 200, description = "Medicines of one prescription", body = [MedicineDto]),
        (status = 404, description = "Prescription not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Fetch the medicine entries of one prescription.
#[axum::debug_handler]
async fn get_prescription_medicines(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<uuid::Uuid>,
) -> Result<Json<Vec<MedicineDto>>, (StatusCode, &'static str)> {
    match state.store.get(id) {
        Ok(prescription) => Ok(Json(
            prescription
                .medicines
                .into_iter()
                .map(MedicineDto::from)
                .collect(),
        )),
        Err(StoreError::NotFound(_)) => {
            Err((StatusCode::NOT_FOUND, "Prescription not found"))
        }
        Err(e) => {
            tracing::error!("Get prescription medicines error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/reminders",
    request_body = ReminderReq,
    responses(
        (status = 200, description = "Reminder derived", body = ReminderRes),
        (status = 400, description = "Bad request")
    )
)]
/// Derive a daily calendar reminder for one medicine.
///
/// Returns the Google Calendar deep link along with the resolved dose slots
/// and the event window. The event itself is never stored — the caller opens
/// the link.
#[axum::debug_handler]
async fn create_reminder(
    Json(req): Json<ReminderReq>,
) -> Result<Json<ReminderRes>, (StatusCode, &'static str)> {
    let medicine_name = match NonEmptyText::new(&req.medicine_name) {
        Ok(name) => name,
        Err(e) => {
            tracing::error!("Invalid medicine name: {:?}", e);
            return Err((StatusCode::BAD_REQUEST, "Invalid medicine name"));
        }
    };
    let medicine_type: MedicineType = req
        .medicine_type
        .parse()
        .expect("parsing is infallible");

    let medicine = Medicine {
        medicine_name,
        medicine_type,
        dosage_pattern: req.dosage_pattern,
        instructions: req.instructions,
        total_quantity: None,
        duration_days: DurationDays::from_signed(req.duration_days),
        description: String::new(),
        purpose: req.purpose,
    };

    let timing = resolve_timing(&medicine.instructions);
    let slots = resolve_slots(&medicine.dosage_pattern);
    let event = build_reminder(&medicine);

    Ok(Json(ReminderRes {
        calendar_link: event.google_calendar_url().to_string(),
        slots: slots.iter().map(ToString::to_string).collect(),
        anchor_time: timing.time_for(slots[0]).format("%H:%M").to_string(),
        start: event.start,
        end: event.end,
        recurrence_count: event.recurrence.get(),
    }))
}
