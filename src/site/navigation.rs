//! 课程导航
//!
//! 链接按路由语义解析：`..` 去掉当前路径的最后一段，`.` 不变，
//! 以 `/` 开头的目标视为绝对路径

use std::collections::BTreeMap;

use crate::error::{AppError, AppResult, ContentError, NavigationError};
use crate::models::lesson::{LessonPage, NavDirection};

/// 把 `target` 相对 `current` 解析成规范化的绝对路径
pub fn resolve_path(current: &str, target: &str) -> String {
    let mut segments: Vec<&str> = if target.starts_with('/') {
        Vec::new()
    } else {
        current.split('/').filter(|s| !s.is_empty()).collect()
    };

    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}

/// 已加载课程的索引，按路径排序
#[derive(Debug, Default)]
pub struct LessonIndex {
    lessons: BTreeMap<String, LessonPage>,
}

impl LessonIndex {
    /// 建立索引；路径重复视为内容错误
    pub fn new(lessons: Vec<LessonPage>) -> Result<Self, ContentError> {
        let mut map = BTreeMap::new();
        for lesson in lessons {
            let key = resolve_path("/", &lesson.path);
            if map.contains_key(&key) {
                return Err(ContentError::DuplicateLesson { path: key });
            }
            map.insert(key, lesson);
        }
        Ok(Self { lessons: map })
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&LessonPage> {
        self.lessons.get(&resolve_path("/", path))
    }

    /// 按完整路径或最后一段（slug）查找
    pub fn find(&self, path_or_slug: &str) -> Option<&LessonPage> {
        self.get(path_or_slug).or_else(|| {
            let slug = path_or_slug.trim_matches('/');
            self.lessons.values().find(|lesson| lesson.slug() == slug)
        })
    }

    pub fn first(&self) -> Option<&LessonPage> {
        self.lessons.values().next()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.lessons.keys().map(String::as_str)
    }

    /// 解析课程某个方向的链接
    ///
    /// # 错误
    /// - `NoLink`: 课程没有这个方向的链接
    /// - `UnknownLesson`: 目标路径没有已加载的课程
    pub fn resolve_link(&self, lesson: &LessonPage, direction: NavDirection) -> AppResult<&LessonPage> {
        let link = lesson
            .nav
            .link(direction)
            .ok_or_else(|| NavigationError::NoLink {
                path: lesson.path.clone(),
                direction: direction.name().to_string(),
            })?;

        let target = resolve_path(&lesson.path, &link.to);
        self.get(&target)
            .ok_or_else(|| AppError::unknown_lesson(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lesson::{LessonNav, NavLink, PageMeta};

    fn lesson(path: &str, next: Option<&str>) -> LessonPage {
        LessonPage {
            path: path.to_string(),
            title: path.to_string(),
            subtitle: None,
            meta: PageMeta {
                title: path.to_string(),
                description: String::new(),
            },
            sections: Vec::new(),
            checks: Vec::new(),
            faqs: Vec::new(),
            quiz: None,
            nav: LessonNav {
                back: Some(NavLink {
                    label: "Back".to_string(),
                    to: "../module-1".to_string(),
                }),
                previous: None,
                next: next.map(|to| NavLink {
                    label: "Next".to_string(),
                    to: to.to_string(),
                }),
            },
            file_path: None,
        }
    }

    #[test]
    fn test_resolve_relative_paths() {
        assert_eq!(
            resolve_path("/study-centre/section-1", "../section-2"),
            "/study-centre/section-2"
        );
        assert_eq!(resolve_path("/a/b", "./c"), "/a/b/c");
        assert_eq!(resolve_path("/a/b", "../../../x"), "/x");
        assert_eq!(resolve_path("/a/b", "/c/d/"), "/c/d");
    }

    #[test]
    fn test_resolve_link_to_loaded_lesson() {
        let index = LessonIndex::new(vec![
            lesson("/course/section-1", Some("../section-2")),
            lesson("/course/section-2", None),
        ])
        .unwrap();

        let current = index.get("/course/section-1").unwrap();
        let next = index.resolve_link(current, NavDirection::Next).unwrap();
        assert_eq!(next.path, "/course/section-2");
    }

    #[test]
    fn test_resolve_link_errors() {
        let index = LessonIndex::new(vec![lesson("/course/section-1", None)]).unwrap();
        let current = index.get("/course/section-1").unwrap();

        assert!(matches!(
            index.resolve_link(current, NavDirection::Next),
            Err(crate::error::AppError::Navigation(NavigationError::NoLink { .. }))
        ));
        assert!(matches!(
            index.resolve_link(current, NavDirection::Back),
            Err(crate::error::AppError::Navigation(NavigationError::UnknownLesson { .. }))
        ));
    }

    #[test]
    fn test_find_by_slug_and_duplicates() {
        let index = LessonIndex::new(vec![lesson("/course/section-1", None)]).unwrap();
        assert!(index.find("section-1").is_some());
        assert!(index.find("/course/section-1/").is_some());
        assert!(index.find("section-9").is_none());

        assert!(LessonIndex::new(vec![
            lesson("/course/section-1", None),
            lesson("/course/section-1/", None),
        ])
        .is_err());
    }
}
