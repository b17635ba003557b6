use serde::Serialize;
use strum::{AsRefStr, EnumIter};

/// Device bucket. Declaration order is the order buckets are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, EnumIter)]
pub enum DeviceType {
    Mobile,
    Desktop,
    Tablet,
    Other,
}

/// 按 User-Agent 子串归类设备
///
/// 检查顺序固定：mobile 关键字优先于 tablet，tablet 优先于桌面系统。
/// 因此 "Android ... Tablet" 归为 Mobile。
pub fn classify_device(user_agent: &str) -> DeviceType {
    let ua = user_agent.to_lowercase();

    if ["mobile", "android", "iphone"].iter().any(|k| ua.contains(k)) {
        DeviceType::Mobile
    } else if ["tablet", "ipad"].iter().any(|k| ua.contains(k)) {
        DeviceType::Tablet
    } else if ["windows", "mac", "linux"].iter().any(|k| ua.contains(k)) {
        DeviceType::Desktop
    } else {
        DeviceType::Other
    }
}
