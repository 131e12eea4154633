use tracing::{info, warn};

/// User-facing messages shown by the page
pub mod messages {
    pub const NOT_FOUND: &str = "Gayrimenkul bulunamadı";
    pub const FILL_ALL_FIELDS: &str = "Lütfen tüm alanları doldurun";
    pub const WELCOME: &str = "Hoş geldiniz!";
    pub const GENERIC_ERROR: &str = "Bir hata oluştu";
    pub const LINK_COPIED: &str = "Link kopyalandı";
}

/// Toast / notification surface
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that writes toasts to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!("✅ {}", message);
    }

    fn error(&self, message: &str) {
        warn!("❌ {}", message);
    }
}
