//! Persisted document model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog;

/// Text or link variants for the three site languages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Localized {
    #[serde(default)]
    pub zh: String,
    #[serde(default)]
    pub tw: String,
    #[serde(default)]
    pub en: String,
}

/// Banner pinned above the monitor table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopAd {
    pub id: String,
    pub text: Localized,
    pub url: Localized,
}

/// Entry in the rotating banner slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotatingAd {
    pub id: String,
    pub text: Localized,
    pub url: Localized,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_placeholder: Option<bool>,
}

/// Approved partner link shown in the footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendLink {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// SEO text for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoText {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: String,
}

/// Per-language SEO configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoConfig {
    pub zh: SeoText,
    pub tw: SeoText,
    pub en: SeoText,
    #[serde(default)]
    pub author: String,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            zh: SeoText {
                title: "pingboard - 在线网络检测工具".to_string(),
                description: "批量检测国内外网站的连通性、延迟、抖动和丢包率".to_string(),
                keywords: "ping,网络检测,延迟检测,网络监控".to_string(),
            },
            tw: SeoText {
                title: "pingboard - 線上網路檢測工具".to_string(),
                description: "批次檢測國內外網站的連通性、延遲、抖動和掉包率".to_string(),
                keywords: "ping,網路檢測,延遲檢測,網路監控".to_string(),
            },
            en: SeoText {
                title: "pingboard - online network latency monitor".to_string(),
                description: "Batch connectivity, latency, jitter and packet loss checks for domestic and international sites".to_string(),
                keywords: "ping,latency,network monitoring,packet loss".to_string(),
            },
            author: "pingboard".to_string(),
        }
    }
}

/// Site operator contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub wechat: String,
    #[serde(default)]
    pub qq: String,
}

/// Operator-editable preset catalogs offered by the target picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteCatalog {
    #[serde(default = "catalog::domestic")]
    pub domestic: Vec<String>,
    #[serde(default = "catalog::international")]
    pub international: Vec<String>,
}

impl Default for RouteCatalog {
    fn default() -> Self {
        Self {
            domestic: catalog::domestic(),
            international: catalog::international(),
        }
    }
}

/// The whole `site.json` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDocument {
    #[serde(default)]
    pub top_ads: Vec<TopAd>,
    #[serde(default)]
    pub rotating_ads: Vec<RotatingAd>,
    #[serde(default)]
    pub friend_links: Vec<FriendLink>,
    #[serde(default)]
    pub seo_config: SeoConfig,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub route_config: RouteCatalog,
}

/// Review lifecycle of a link application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

/// A submitted link-exchange application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkApplication {
    pub id: String,
    pub site_name: String,
    pub site_url: String,
    #[serde(default)]
    pub language: String,
    pub timestamp: DateTime<Utc>,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
}

/// The whole `links.json` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkDocument {
    #[serde(default)]
    pub applications: Vec<LinkApplication>,
    #[serde(default)]
    pub approved: Vec<FriendLink>,
}
