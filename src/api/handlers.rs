//! HTTP request handlers for the study assistant API.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::error::ApiError;
use crate::generation::{
    self, build_answer_prompt, build_explain_prompt, build_flashcard_prompt, build_quiz_prompt,
    build_summary_prompt, parse_flashcards, parse_quiz, Flashcard, GenerationService,
    QuizQuestion, RetryPolicy,
};
use crate::pipeline::DocumentProcessor;
use crate::retrieval::find_relevant_chunks;
use crate::store::DocumentStore;
use crate::types::{
    Chunk, DocumentDetail, DocumentRecord, DocumentStatus, DocumentSummary,
    IngestDocumentRequest, IngestDocumentResponse, ServiceConfig,
};

/// Application state shared across handlers.
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub processor: Arc<DocumentProcessor>,
    pub generation: Option<Arc<dyn GenerationService>>,
    pub config: ServiceConfig,
}

impl AppState {
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_max_attempts(self.config.generation_max_retries)
    }

    fn generation_service(&self) -> Result<&Arc<dyn GenerationService>, ApiError> {
        self.generation.as_ref().ok_or_else(|| {
            ApiError::ServiceUnavailable(
                "No generation service is configured. Set GENERATION_SERVICE_URL.".to_string(),
            )
        })
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Accept an extracted document and start background chunking.
pub async fn ingest_document(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IngestDocumentRequest>,
) -> Result<(StatusCode, Json<IngestDocumentResponse>), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Please provide a title for the document".to_string(),
        ));
    }

    let document_id = state.store.create(request.title.clone()).await;

    info!(
        document_id = %document_id,
        title = %request.title,
        chars = request.text.len(),
        "Accepted document for processing"
    );

    let processor = Arc::clone(&state.processor);
    tokio::spawn(async move {
        processor
            .process(document_id, request.text, request.pages)
            .await;
    });

    Ok((
        StatusCode::CREATED,
        Json(IngestDocumentResponse {
            document_id,
            status: DocumentStatus::Processing,
            message: Some("Document uploaded successfully. Processing document...".to_string()),
        }),
    ))
}

/// List document summaries, newest first.
pub async fn list_documents(State(state): State<Arc<AppState>>) -> Json<Vec<DocumentSummary>> {
    Json(state.store.list().await)
}

/// Get a single document's detail view.
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<DocumentDetail>, ApiError> {
    let record = state
        .store
        .get(document_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Document not found".to_string()))?;

    state.store.touch(document_id).await;

    Ok(Json(DocumentDetail {
        summary: record.to_summary(),
        extracted_chars: record.extracted_text.len(),
    }))
}

/// Get a document's ordered chunk list.
pub async fn get_document_chunks(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<Vec<Chunk>>, ApiError> {
    let record = state
        .store
        .get(document_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Document not found".to_string()))?;

    Ok(Json(record.chunks))
}

/// Delete response.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    message: String,
}

/// Delete a document and its chunks.
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if state.store.delete(document_id).await {
        Ok(Json(DeleteResponse {
            message: "Document deleted successfully".to_string(),
        }))
    } else {
        Err(ApiError::NotFound("Document not found".to_string()))
    }
}

/// Load a document that has finished processing, translating lifecycle
/// states into caller-facing errors.
async fn completed_document(
    state: &AppState,
    document_id: Uuid,
) -> Result<DocumentRecord, ApiError> {
    let record = state
        .store
        .get(document_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Document not found".to_string()))?;

    match record.status {
        DocumentStatus::Processing => Err(ApiError::BadRequest(
            "The document is still being processed. Please wait a moment and try again."
                .to_string(),
        )),
        DocumentStatus::Failed => Err(ApiError::BadRequest(
            "Processing failed for this document. Try re-uploading it.".to_string(),
        )),
        DocumentStatus::Completed => Ok(record),
    }
}

/// Like [`completed_document`], additionally requiring stored chunks.
async fn chunked_document(
    state: &AppState,
    document_id: Uuid,
) -> Result<DocumentRecord, ApiError> {
    let record = completed_document(state, document_id).await?;
    if record.chunks.is_empty() {
        return Err(ApiError::BadRequest(
            "Document has no content chunks. Please re-upload the document.".to_string(),
        ));
    }
    Ok(record)
}

/// Chat request: a question against one document.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub document_id: Uuid,
    pub question: String,
}

/// Chat response: the grounded answer plus which chunks grounded it.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub question: String,
    pub answer: String,
    pub relevant_chunks: Vec<usize>,
}

/// Answer a question about a document, grounded in its most relevant
/// chunks.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::BadRequest("Please provide a question".to_string()));
    }

    let service = state.generation_service()?;
    let record = chunked_document(&state, request.document_id).await?;

    let relevant = find_relevant_chunks(
        &record.chunks,
        &request.question,
        state.config.retrieval.top_k,
    )?;
    let chunk_indices: Vec<usize> = relevant.iter().map(|c| c.chunk_index()).collect();

    let prompt = build_answer_prompt(&request.question, &relevant);
    let answer =
        generation::generate_with_retry(service.as_ref(), &prompt, state.retry_policy()).await?;

    info!(
        document_id = %request.document_id,
        chunks_used = chunk_indices.len(),
        "Answered question"
    );

    Ok(Json(ChatResponse {
        question: request.question,
        answer,
        relevant_chunks: chunk_indices,
    }))
}

/// Concept explanation request.
#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    pub document_id: Uuid,
    pub concept: String,
}

/// Concept explanation response.
#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub concept: String,
    pub explanation: String,
    pub relevant_chunks: Vec<usize>,
}

/// Explain a concept using the document's most relevant chunks.
pub async fn explain_concept(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExplainRequest>,
) -> Result<Json<ExplainResponse>, ApiError> {
    if request.concept.trim().is_empty() {
        return Err(ApiError::BadRequest("Please provide a concept".to_string()));
    }

    let service = state.generation_service()?;
    let record = chunked_document(&state, request.document_id).await?;

    let relevant = find_relevant_chunks(
        &record.chunks,
        &request.concept,
        state.config.retrieval.top_k,
    )?;
    let chunk_indices: Vec<usize> = relevant.iter().map(|c| c.chunk_index()).collect();

    let context = relevant
        .iter()
        .map(|c| c.content())
        .collect::<Vec<_>>()
        .join("\n\n");
    let prompt = build_explain_prompt(&request.concept, &context);
    let explanation =
        generation::generate_with_retry(service.as_ref(), &prompt, state.retry_policy()).await?;

    Ok(Json(ExplainResponse {
        concept: request.concept,
        explanation,
        relevant_chunks: chunk_indices,
    }))
}

/// Summary request.
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub document_id: Uuid,
}

/// Summary response.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub document_id: Uuid,
    pub summary: String,
}

/// Summarize a document's full extracted text.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let service = state.generation_service()?;
    let record = completed_document(&state, request.document_id).await?;

    if record.extracted_text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Document content is empty. Cannot generate a summary.".to_string(),
        ));
    }

    let prompt = build_summary_prompt(&record.extracted_text);
    let summary =
        generation::generate_with_retry(service.as_ref(), &prompt, state.retry_policy()).await?;

    Ok(Json(SummaryResponse {
        document_id: request.document_id,
        summary,
    }))
}

fn default_flashcard_count() -> usize {
    10
}

fn default_quiz_count() -> usize {
    5
}

/// Flashcard generation request.
#[derive(Debug, Deserialize)]
pub struct FlashcardsRequest {
    pub document_id: Uuid,
    #[serde(default = "default_flashcard_count")]
    pub count: usize,
}

/// Flashcard generation response.
#[derive(Debug, Serialize)]
pub struct FlashcardsResponse {
    pub document_id: Uuid,
    pub flashcards: Vec<Flashcard>,
}

/// Generate flashcards from a document's text.
pub async fn generate_flashcards(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FlashcardsRequest>,
) -> Result<Json<FlashcardsResponse>, ApiError> {
    let service = state.generation_service()?;
    let record = completed_document(&state, request.document_id).await?;

    if record.extracted_text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Document content is empty. Cannot generate flashcards.".to_string(),
        ));
    }

    let prompt = build_flashcard_prompt(&record.extracted_text, request.count);
    let generated =
        generation::generate_with_retry(service.as_ref(), &prompt, state.retry_policy()).await?;
    let flashcards = parse_flashcards(&generated, request.count);

    info!(
        document_id = %request.document_id,
        requested = request.count,
        parsed = flashcards.len(),
        "Generated flashcards"
    );

    Ok(Json(FlashcardsResponse {
        document_id: request.document_id,
        flashcards,
    }))
}

/// Quiz generation request.
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub document_id: Uuid,
    #[serde(default = "default_quiz_count")]
    pub count: usize,
}

/// Quiz generation response.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub document_id: Uuid,
    pub questions: Vec<QuizQuestion>,
}

/// Generate a multiple-choice quiz from a document's text.
pub async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let service = state.generation_service()?;
    let record = completed_document(&state, request.document_id).await?;

    if record.extracted_text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Document content is empty. Cannot generate a quiz.".to_string(),
        ));
    }

    let prompt = build_quiz_prompt(&record.extracted_text, request.count);
    let generated =
        generation::generate_with_retry(service.as_ref(), &prompt, state.retry_policy()).await?;
    let questions = parse_quiz(&generated, request.count);

    Ok(Json(QuizResponse {
        document_id: request.document_id,
        questions,
    }))
}
