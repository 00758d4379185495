//! Subject HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{
    AddChapter, AddContent, AddExercise, ApplicationError, DeleteChapter, GetChapterContents,
    GetChapterExercises, GetChapterNames, GetSubjectExercises, ListSubjects, MediaStoragePort,
    SubjectProjection,
};
use crate::domain::subject::Exercise;
use crate::infrastructure::http::dto::{
    AddChapterRequest, AddExerciseRequest, ChapterContentsDto, DataResponse, SuccessResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::{ContentForm, LenientJson, UploadedFile};
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Queries
// ============================================================================

/// 列出所有课程（仅标题）
pub async fn list_subjects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<SubjectProjection>>>, ApiError> {
    let subjects = state
        .list_subjects_handler
        .handle(ListSubjects)
        .await
        .map_err(ApiError::from_query)?;

    Ok(Json(DataResponse::new(subjects)))
}

/// 课程的章节名列表
pub async fn get_chapter_names(
    State(state): State<Arc<AppState>>,
    Path(subject_title): Path<String>,
) -> Result<Json<DataResponse<SubjectProjection>>, ApiError> {
    let subject = state
        .get_chapter_names_handler
        .handle(GetChapterNames { subject_title })
        .await
        .map_err(ApiError::from_query)?;

    Ok(Json(DataResponse::new(subject)))
}

/// 单个章节的内容
pub async fn get_chapter_contents(
    State(state): State<Arc<AppState>>,
    Path((subject_code, chapter_code)): Path<(String, String)>,
) -> Result<Json<DataResponse<ChapterContentsDto>>, ApiError> {
    let contents = state
        .get_chapter_contents_handler
        .handle(GetChapterContents {
            subject_code,
            chapter_code,
        })
        .await
        .map_err(ApiError::from_query)?;

    Ok(Json(DataResponse::new(contents.into())))
}

/// 课程下所有章节的练习
pub async fn get_subject_exercises(
    State(state): State<Arc<AppState>>,
    Path(subject_title): Path<String>,
) -> Result<Json<DataResponse<SubjectProjection>>, ApiError> {
    let subject = state
        .get_subject_exercises_handler
        .handle(GetSubjectExercises { subject_title })
        .await
        .map_err(ApiError::from_query)?;

    Ok(Json(DataResponse::new(subject)))
}

/// 单个章节的练习
pub async fn get_chapter_exercises(
    State(state): State<Arc<AppState>>,
    Path((subject_code, chapter_code)): Path<(String, String)>,
) -> Result<Json<DataResponse<Vec<Exercise>>>, ApiError> {
    let exercises = state
        .get_chapter_exercises_handler
        .handle(GetChapterExercises {
            subject_code,
            chapter_code,
        })
        .await
        .map_err(ApiError::from_query)?;

    Ok(Json(DataResponse::new(exercises)))
}

// ============================================================================
// Commands
// ============================================================================

/// 追加章节
pub async fn add_chapter(
    State(state): State<Arc<AppState>>,
    Path(subject_title): Path<String>,
    LenientJson(req): LenientJson<AddChapterRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .add_chapter_handler
        .handle(AddChapter {
            subject_title,
            name: req.chapter_name,
            chapter_code: req.chapter_code,
        })
        .await
        .map_err(|e| ApiError::from_command("chapter", e))?;

    Ok(Json(SuccessResponse::new("Chapter Saved Successfully")))
}

/// 追加章节内容
///
/// multipart 上传的 `image` / `video` 文件先写入媒体存储，
/// 生成的相对路径覆盖同名文本字段；写库失败时删除已上传的文件
pub async fn add_content(
    State(state): State<Arc<AppState>>,
    Path((subject_title, chapter_code)): Path<(String, String)>,
    form: ContentForm,
) -> Result<Json<SuccessResponse>, ApiError> {
    let ContentForm {
        fields,
        image,
        video,
    } = form;
    let mut uploaded = Vec::new();

    let img = match image {
        Some(file) => store_upload(state.media_storage.as_ref(), &file, &mut uploaded).await?,
        None => fields.img,
    };
    let video = match video {
        Some(file) => match store_upload(state.media_storage.as_ref(), &file, &mut uploaded).await
        {
            Ok(path) => path,
            Err(e) => {
                discard_uploads(state.media_storage.as_ref(), &uploaded).await;
                return Err(e);
            }
        },
        None => fields.video,
    };

    let result = state
        .add_content_handler
        .handle(AddContent {
            subject_title,
            chapter_code,
            text: fields.text,
            img,
            video,
        })
        .await;

    if let Err(e) = result {
        discard_uploads(state.media_storage.as_ref(), &uploaded).await;
        return Err(ApiError::from_command("content", e));
    }

    Ok(Json(SuccessResponse::new("Contents Saved Successfully")))
}

/// 追加练习题
pub async fn add_exercise(
    State(state): State<Arc<AppState>>,
    Path((subject_title, chapter_code)): Path<(String, String)>,
    LenientJson(req): LenientJson<AddExerciseRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .add_exercise_handler
        .handle(AddExercise {
            subject_title,
            chapter_code,
            question: req.question,
            options: req.options,
            correct_option: req.correct_option,
        })
        .await
        .map_err(|e| ApiError::from_command("exercise", e))?;

    Ok(Json(SuccessResponse::new("Exercise Saved Successfully")))
}

/// 删除章节
pub async fn delete_chapter(
    State(state): State<Arc<AppState>>,
    Path((subject_title, chapter_code)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .delete_chapter_handler
        .handle(DeleteChapter {
            subject_title,
            chapter_code,
        })
        .await
        .map_err(|e| ApiError::from_command("chapter", e))?;

    Ok(Json(SuccessResponse::new("Chapter Deleted Successfully")))
}

// ============================================================================
// Upload helpers
// ============================================================================

async fn store_upload(
    storage: &dyn MediaStoragePort,
    file: &UploadedFile,
    uploaded: &mut Vec<String>,
) -> Result<String, ApiError> {
    let stored = storage
        .save(&file.content_type, &file.data)
        .await
        .map_err(ApplicationError::from)?;

    tracing::info!(
        path = %stored.path,
        original_name = file.file_name.as_deref().unwrap_or_default(),
        size = stored.size_bytes,
        "Media uploaded"
    );

    uploaded.push(stored.path.clone());
    Ok(stored.path)
}

async fn discard_uploads(storage: &dyn MediaStoragePort, uploaded: &[String]) {
    for path in uploaded {
        if let Err(e) = storage.remove(path).await {
            tracing::warn!(path = %path, error = %e, "Failed to remove orphaned upload");
        }
    }
}
