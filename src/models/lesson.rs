use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::checks::Quiz;
use crate::error::ContentError;
use crate::models::question::Question;

/// 课程页面
///
/// 一节课的全部静态内容：正文章节、随堂检查、常见问题、课末测验和前后导航。
/// 加载后只读，会话只借用它
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonPage {
    /// 课程路由路径，如 `/study-centre/coshh-awareness-module-1-section-1`
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub meta: PageMeta,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// 随堂检查，由章节按 id 引用
    #[serde(default)]
    pub checks: Vec<Question>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub quiz: Option<QuizSpec>,
    #[serde(default)]
    pub nav: LessonNav,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

/// 页面标题和描述，打开课程时交给元数据钩子
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub callouts: Vec<Callout>,
    /// 本章节之后展示的随堂检查 id
    #[serde(default)]
    pub check: Option<String>,
}

/// 正文中的提示框（如 "Key Term"）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Callout {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// 课末测验的静态定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSpec {
    pub title: String,
    pub questions: Vec<Question>,
}

impl QuizSpec {
    /// 构造一个全新的（未作答）测验实例
    pub fn instantiate(&self) -> Result<Quiz, ContentError> {
        Quiz::new(self.title.clone(), self.questions.clone())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonNav {
    #[serde(default)]
    pub back: Option<NavLink>,
    #[serde(default)]
    pub previous: Option<NavLink>,
    #[serde(default)]
    pub next: Option<NavLink>,
}

/// 导航链接，`to` 可以是相对路径（`../x`）或绝对路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub to: String,
}

/// 导航方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Back,
    Previous,
    Next,
}

impl NavDirection {
    pub fn name(self) -> &'static str {
        match self {
            NavDirection::Back => "Back",
            NavDirection::Previous => "Previous",
            NavDirection::Next => "Next",
        }
    }
}

impl LessonNav {
    pub fn link(&self, direction: NavDirection) -> Option<&NavLink> {
        match direction {
            NavDirection::Back => self.back.as_ref(),
            NavDirection::Previous => self.previous.as_ref(),
            NavDirection::Next => self.next.as_ref(),
        }
    }
}

impl LessonPage {
    /// 在内容边界上做交叉校验
    ///
    /// 单个题目在反序列化时已经校验过，这里检查：
    /// - 随堂检查 id 唯一且都有 id
    /// - 章节引用的随堂检查存在
    /// - 测验可以被构造（非空、id 不重复）
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for (position, check) in self.checks.iter().enumerate() {
            if check.id().is_none() {
                return Err(ContentError::MissingCheckId {
                    lesson: self.path.clone(),
                    position: position + 1,
                });
            }

            let key = check.key(position);
            if !seen.insert(key.clone()) {
                return Err(ContentError::DuplicateId { id: key });
            }
        }

        for section in &self.sections {
            if let Some(check_id) = &section.check {
                if self.find_check(check_id).is_none() {
                    return Err(ContentError::UnknownCheck {
                        lesson: self.path.clone(),
                        check: check_id.clone(),
                    });
                }
            }
        }

        if let Some(quiz) = &self.quiz {
            quiz.instantiate()?;
        }

        Ok(())
    }

    /// 按 id 查找随堂检查
    pub fn find_check(&self, id: &str) -> Option<&Question> {
        self.checks
            .iter()
            .find(|check| check.id().map(|qid| qid.as_str()) == Some(id))
    }

    /// 路径的最后一段，作为课程的短名
    pub fn slug(&self) -> &str {
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.path)
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}
