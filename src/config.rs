use std::str::FromStr;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 课程文件存放目录
    pub lesson_folder: String,
    /// 起始课程（路径或 slug），为空时从第一节开始
    pub start_lesson: Option<String>,
    /// 模拟考试题库目录
    pub exam_folder: String,
    /// 设置后进入模拟考试模式
    pub exam_id: Option<String>,
    /// 覆盖题库配置中的抽题数量
    pub exam_question_count: Option<usize>,
    /// 内容有缺陷时是否直接失败（否则跳过并警告）
    pub strict_content: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lesson_folder: "lessons".to_string(),
            start_lesson: None,
            exam_folder: "exams".to_string(),
            exam_id: None,
            exam_question_count: None,
            strict_content: true,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            lesson_folder: std::env::var("LESSON_FOLDER").unwrap_or(default.lesson_folder),
            start_lesson: non_empty_var("START_LESSON"),
            exam_folder: std::env::var("EXAM_FOLDER").unwrap_or(default.exam_folder),
            exam_id: non_empty_var("EXAM_ID"),
            exam_question_count: non_empty_var("EXAM_QUESTION_COUNT")
                .and_then(|v| parse_or_warn("EXAM_QUESTION_COUNT", &v)),
            strict_content: non_empty_var("STRICT_CONTENT")
                .and_then(|v| parse_or_warn("STRICT_CONTENT", &v))
                .unwrap_or(default.strict_content),
            verbose_logging: non_empty_var("VERBOSE_LOGGING")
                .and_then(|v| parse_or_warn("VERBOSE_LOGGING", &v))
                .unwrap_or(default.verbose_logging),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or_warn<T: FromStr>(name: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            // 日志可能尚未初始化，直接写 stderr
            eprintln!("⚠️ 环境变量 {} 的值 '{}' 无法解析，使用默认值", name, value);
            None
        }
    }
}
