use percent_encoding::percent_decode_str;
use url::Url;

use crate::internal::remote::structs::RemoteEntry;
use crate::internal::webdav::raw_xml::{MultiStatus, PropStat, Prop, Response};

pub trait ToRemoteEntries {
    /// 转换为领域条目；不在 `base_url` 之下的资源会被丢弃。
    fn to_remote_entries(self, base_url: &Url) -> Vec<RemoteEntry>;
}

fn take_ok_propstat(propstats: Vec<PropStat>) -> Option<PropStat> {
    // 第一个 HTTP 状态是 2xx 的 PropStat
    propstats.into_iter().find(|ps| {
        ps.status
            .split_whitespace()
            .find_map(|t| t.parse::<u16>().ok())
            .map(|code| (200..=299).contains(&code))
            .unwrap_or(false)
    })
}

/// 解码 id 的最后一段，作为缺省显示名
fn last_segment_name(id: &str) -> String {
    percent_decode_str(id.rsplit('/').next().unwrap_or(""))
        .decode_utf8_lossy()
        .to_string()
}

/// 计算 url 相对于 base_url 的 id（去掉首尾 `/`，保持 URL 编码）
pub(crate) fn relative_id(base_url: &Url, url: &Url) -> Option<String> {
    let rest = url.path().strip_prefix(base_url.path())?;
    Some(rest.trim_matches('/').to_string())
}

/// 比较两个 id 是否指向同一资源（忽略编码差异）
pub(crate) fn same_resource(a: &str, b: &str) -> bool {
    percent_decode_str(a).decode_utf8_lossy()
        == percent_decode_str(b).decode_utf8_lossy()
}

impl ToRemoteEntries for MultiStatus {
    fn to_remote_entries(self, base_url: &Url) -> Vec<RemoteEntry> {
        let mut entries = Vec::new();

        for Response { href, propstats } in self.responses {
            let Some(PropStat { prop, .. }) = take_ok_propstat(propstats)
            else {
                continue;
            };
            let Prop { resource_type, display_name } = prop;

            let Some(id) = base_url
                .join(&href)
                .ok()
                .and_then(|url| relative_id(base_url, &url))
            else {
                continue;
            };

            let name = display_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| {
                    if id.is_empty() {
                        last_segment_name(base_url.path().trim_end_matches('/'))
                    } else {
                        last_segment_name(&id)
                    }
                });

            let is_dir = resource_type
                .and_then(|rt| rt.is_collection)
                .is_some();

            // WebDAV 不提供 MD5，指纹留空
            entries.push(if is_dir {
                RemoteEntry::container(id, name)
            } else {
                RemoteEntry::file(id, name, "")
            });
        }

        entries
    }
}
