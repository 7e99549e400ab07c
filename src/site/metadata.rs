use tracing::info;

/// 页面元数据钩子
///
/// 每次打开课程时调用一次，返回值不被使用
pub trait PageMetadata {
    fn set_page_metadata(&self, title: &str, description: &str);
}

/// 只写日志的默认实现
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggedMetadata;

impl PageMetadata for LoggedMetadata {
    fn set_page_metadata(&self, title: &str, description: &str) {
        info!("📄 {}", title);
        tracing::debug!("页面描述: {}", crate::utils::logging::truncate_text(description, 80));
    }
}
