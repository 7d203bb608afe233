//! Built-in preset target catalogs.
//!
//! Seed lists for the domestic and international presets. The operator can
//! override either list through the site configuration document.

/// Default domestic preset.
pub const DOMESTIC: &[&str] = &[
    "baidu.com",
    "qq.com",
    "taobao.com",
    "jd.com",
    "weibo.com",
    "163.com",
    "sohu.com",
    "sina.com.cn",
    "aliyun.com",
    "tencent.com",
    "bilibili.com",
    "zhihu.com",
    "douyin.com",
    "xiaohongshu.com",
    "meituan.com",
    "dianping.com",
    "ctrip.com",
    "12306.cn",
    "mi.com",
    "huawei.com",
    "oppo.com",
    "vivo.com",
    "iqiyi.com",
    "youku.com",
    "douban.com",
    "csdn.net",
    "cnblogs.com",
    "ifeng.com",
    "58.com",
    "autohome.com.cn",
];

/// Default international preset.
pub const INTERNATIONAL: &[&str] = &[
    "google.com",
    "youtube.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "wikipedia.org",
    "amazon.com",
    "netflix.com",
    "github.com",
    "stackoverflow.com",
    "reddit.com",
    "microsoft.com",
    "apple.com",
    "cloudflare.com",
    "linkedin.com",
    "twitch.tv",
    "spotify.com",
    "discord.com",
    "telegram.org",
    "whatsapp.com",
    "tiktok.com",
    "yahoo.com",
    "bing.com",
    "duckduckgo.com",
    "mozilla.org",
    "dropbox.com",
    "medium.com",
    "paypal.com",
    "ebay.com",
    "steamcommunity.com",
];

/// Owned copy of the domestic preset.
pub fn domestic() -> Vec<String> {
    DOMESTIC.iter().map(|d| d.to_string()).collect()
}

/// Owned copy of the international preset.
pub fn international() -> Vec<String> {
    INTERNATIONAL.iter().map(|d| d.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_are_probe_ready() {
        for domain in DOMESTIC.iter().chain(INTERNATIONAL.iter()) {
            assert!(!domain.contains("://"), "scheme in {}", domain);
            assert!(!domain.ends_with('/'), "trailing slash in {}", domain);
            assert!(!domain.contains(char::is_whitespace), "whitespace in {}", domain);
        }
        assert!(!DOMESTIC.is_empty());
        assert!(!INTERNATIONAL.is_empty());
    }

    #[test]
    fn test_owned_copies_match() {
        assert_eq!(domestic().len(), DOMESTIC.len());
        assert_eq!(international().len(), INTERNATIONAL.len());
    }
}
