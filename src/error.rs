use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 课程内容错误（编写期缺陷）
    #[error("内容错误: {0}")]
    Content(#[from] ContentError),
    /// 作答错误（界面接线缺陷）
    #[error("作答错误: {0}")]
    Selection(#[from] SelectionError),
    /// 导航错误
    #[error("导航错误: {0}")]
    Navigation(#[from] NavigationError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 课程内容错误
///
/// 全部属于编写期缺陷，在内容加载时立即失败，不在运行期修补
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// 选项数量不足
    #[error("题目 {id} 至少需要 2 个选项，实际 {len} 个")]
    TooFewOptions { id: String, len: usize },
    /// 正确答案索引越界
    #[error("题目 {id} 的正确答案索引 {index} 超出选项范围 [0, {len})")]
    CorrectIndexOutOfRange { id: String, index: usize, len: usize },
    /// 题干为空
    #[error("题目 {id} 的题干为空")]
    BlankPrompt { id: String },
    /// 测验没有题目
    #[error("测验「{title}」没有任何题目")]
    EmptyQuiz { title: String },
    /// 同一列表内 id 重复
    #[error("列表中存在重复的题目 id: {id}")]
    DuplicateId { id: String },
    /// 随堂检查缺少 id，无法被章节引用
    #[error("课程 {lesson} 的第 {position} 个随堂检查缺少 id")]
    MissingCheckId { lesson: String, position: usize },
    /// 章节引用了不存在的随堂检查
    #[error("课程 {lesson} 引用了不存在的随堂检查: {check}")]
    UnknownCheck { lesson: String, check: String },
    /// 课程路径重复
    #[error("课程路径重复: {path}")]
    DuplicateLesson { path: String },
    /// 题库配置无效
    #[error("题库 {exam_id} 配置无效: {reason}")]
    InvalidExam { exam_id: String, reason: String },
}

/// 作答错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// 选项索引越界
    #[error("选项索引 {index} 超出范围 [0, {len})")]
    OptionOutOfRange { index: usize, len: usize },
    /// 题目索引越界
    #[error("题目索引 {index} 超出范围 [0, {len})")]
    QuestionOutOfRange { index: usize, len: usize },
    /// 已经作答（首次作答即锁定）
    #[error("该题已作答（已选 {selected}），不能更改")]
    AlreadyAnswered { selected: usize },
}

/// 导航错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// 目标课程未加载
    #[error("未找到课程: {path}")]
    UnknownLesson { path: String },
    /// 课程没有这个方向的链接
    #[error("课程 {path} 没有「{direction}」链接")]
    NoLink { path: String, direction: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 不支持的文件格式
    #[error("不支持的文件格式: {path}")]
    UnsupportedFormat { path: String },
    /// 内容解析失败
    #[error("解析失败 ({path}): {message}")]
    ParseFailed { path: String, message: String },
}

// ========== 从常见错误类型转换 ==========

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: err,
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::ParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            message: err.to_string(),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::File(FileError::ParseFailed {
            path: String::new(),
            message: err.to_string(),
        })
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Other(format!("正则表达式编译失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建内容解析错误
    pub fn parse_failed(path: impl Into<String>, message: impl std::fmt::Display) -> Self {
        AppError::File(FileError::ParseFailed {
            path: path.into(),
            message: message.to_string(),
        })
    }

    /// 创建未知课程错误
    pub fn unknown_lesson(path: impl Into<String>) -> Self {
        AppError::Navigation(NavigationError::UnknownLesson { path: path.into() })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
