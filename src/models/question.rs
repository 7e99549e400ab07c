use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ContentError;

/// 题目标识
///
/// 原始内容里既有字符串 id（`"coshh-stands-for"`）也有整数 id（`1`），
/// 统一保存为字符串，仅要求在所属列表内唯一
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for QuestionId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

// id 可以是字符串或整数
impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = QuestionId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer question id")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(QuestionId(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(QuestionId(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(QuestionId(value.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// 单选题记录
///
/// 构造后不可变；`correct_index` 一定落在 `options` 范围内
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<QuestionId>,
    #[serde(rename = "question")]
    prompt: String,
    options: Vec<String>,
    #[serde(rename = "correctIndex")]
    correct_index: usize,
    explanation: String,
}

impl Question {
    /// 创建题目并校验
    ///
    /// # 错误
    /// - 选项少于 2 个
    /// - 正确答案索引越界
    /// - 题干为空
    pub fn new(
        id: Option<QuestionId>,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, ContentError> {
        let prompt = prompt.into();
        let label = id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "<无 id>".to_string());

        if prompt.trim().is_empty() {
            return Err(ContentError::BlankPrompt { id: label });
        }

        if options.len() < 2 {
            return Err(ContentError::TooFewOptions {
                id: label,
                len: options.len(),
            });
        }

        if correct_index >= options.len() {
            return Err(ContentError::CorrectIndexOutOfRange {
                id: label,
                index: correct_index,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct_index,
            explanation: explanation.into(),
        })
    }

    pub fn id(&self) -> Option<&QuestionId> {
        self.id.as_ref()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// 判断某个选项是否正确
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_index
    }

    /// 渲染用的 key：优先 id，没有 id 时退回到列表位置
    pub fn key(&self, position: usize) -> String {
        self.id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("#{}", position + 1))
    }
}

/// 内容文件中的原始题目结构
///
/// 兼容两种写法：随堂检查使用 `correctIndex`，测验与题库使用 `correctAnswer`
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    id: Option<QuestionId>,
    #[serde(alias = "prompt")]
    question: String,
    options: Vec<String>,
    #[serde(alias = "correctIndex", alias = "correctAnswer", alias = "correct_answer")]
    correct_index: usize,
    #[serde(default)]
    explanation: String,
}

impl TryFrom<RawQuestion> for Question {
    type Error = ContentError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        Question::new(
            raw.id,
            raw.question,
            raw.options,
            raw.correct_index,
            raw.explanation,
        )
    }
}
