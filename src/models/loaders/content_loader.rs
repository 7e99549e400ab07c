use crate::error::{AppError, AppResult, ContentError, FileError};
use crate::models::exam::ExamBank;
use crate::models::lesson::LessonPage;
use futures::future::join_all;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 支持的内容文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentFormat {
    Toml,
    Json,
}

impl ContentFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Some(ContentFormat::Toml),
            Some("json") => Some(ContentFormat::Json),
            _ => None,
        }
    }
}

/// 读取文件并按扩展名解析
async fn read_content<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let display = path.display().to_string();
    let format = ContentFormat::from_path(path)
        .ok_or_else(|| AppError::File(FileError::UnsupportedFormat { path: display.clone() }))?;

    let content = fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::File(FileError::NotFound { path: display.clone() })
        } else {
            AppError::file_read_failed(display.clone(), e)
        }
    })?;

    match format {
        ContentFormat::Toml => {
            toml::from_str(&content).map_err(|e| AppError::parse_failed(display, e))
        }
        ContentFormat::Json => {
            serde_json::from_str(&content).map_err(|e| AppError::parse_failed(display, e))
        }
    }
}

/// 从 TOML / JSON 文件加载一节课程并校验
pub async fn load_lesson(lesson_file_path: &Path) -> AppResult<LessonPage> {
    let lesson: LessonPage = read_content(lesson_file_path).await?;
    lesson.validate()?;

    Ok(lesson.with_file_path(lesson_file_path.to_string_lossy().to_string()))
}

/// 列出文件夹中的内容文件（按文件名排序）
async fn list_content_files(folder: &Path) -> AppResult<Vec<PathBuf>> {
    if fs::metadata(folder).await.is_err() {
        return Err(AppError::File(FileError::DirectoryNotFound {
            path: folder.display().to_string(),
        }));
    }

    let mut files = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder.display().to_string(), e))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if ContentFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// 从文件夹中加载所有课程
///
/// 文件并发解析；`strict` 为 true 时遇到第一个错误即返回，
/// 否则记录警告并跳过该文件。课程路径重复总是报错
pub async fn load_all_lessons(folder_path: &str, strict: bool) -> AppResult<Vec<LessonPage>> {
    let folder = PathBuf::from(folder_path);
    let files = list_content_files(&folder).await?;

    if files.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到课程文件", folder_path);
        return Ok(Vec::new());
    }

    let results = join_all(files.iter().map(|path| load_lesson(path))).await;

    let mut lessons = Vec::with_capacity(results.len());
    let mut seen_paths = HashSet::new();

    for (path, result) in files.iter().zip(results) {
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();
        match result {
            Ok(lesson) => {
                if !seen_paths.insert(lesson.path.clone()) {
                    return Err(ContentError::DuplicateLesson {
                        path: lesson.path.clone(),
                    }
                    .into());
                }

                tracing::info!(
                    "正在加载: {} ({} 个随堂检查, {} 道测验题)",
                    file_name,
                    lesson.checks.len(),
                    lesson.quiz.as_ref().map(|q| q.questions.len()).unwrap_or(0)
                );
                lessons.push(lesson);
            }
            Err(e) if strict => {
                tracing::error!("❌ 加载课程失败 {}: {}", path.display(), e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("⚠️ 跳过课程文件 {}: {}", path.display(), e);
            }
        }
    }

    lessons.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(lessons)
}

/// 按考试 id 加载模拟考试题库（`<exam_id>.toml` 或 `<exam_id>.json`）
pub async fn load_exam_bank(folder_path: &str, exam_id: &str) -> AppResult<ExamBank> {
    let folder = PathBuf::from(folder_path);

    for extension in ["toml", "json"] {
        let path = folder.join(format!("{}.{}", exam_id, extension));
        if fs::metadata(&path).await.is_err() {
            continue;
        }

        tracing::info!(
            "正在加载题库: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        let bank: ExamBank = read_content(&path).await?;
        bank.validate()?;
        tracing::info!("成功加载 {} 道题目", bank.questions.len());
        return Ok(bank);
    }

    Err(AppError::File(FileError::NotFound {
        path: folder.join(format!("{}.toml", exam_id)).display().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_format_from_extension() {
        assert_eq!(
            ContentFormat::from_path(Path::new("lessons/a.toml")),
            Some(ContentFormat::Toml)
        );
        assert_eq!(
            ContentFormat::from_path(Path::new("lessons/a.json")),
            Some(ContentFormat::Json)
        );
        assert_eq!(ContentFormat::from_path(Path::new("lessons/README.md")), None);
    }

    #[tokio::test]
    async fn test_missing_folder_is_reported() {
        let result = load_all_lessons("does-not-exist-anywhere", true).await;
        assert!(matches!(
            result,
            Err(AppError::File(FileError::DirectoryNotFound { .. }))
        ));
    }
}
