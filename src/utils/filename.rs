/// URL 中没有 `/` 时使用的文件名
pub const DEFAULT_FILENAME: &str = "download";

/// 从URL中提取文件名：最后一个 `/` 之后的部分
///
/// 以 `/` 结尾的 URL 得到空字符串，原样返回。
pub fn filename_from_url(url: &str) -> &str {
    match url.rfind('/') {
        Some(last_slash) => &url[last_slash + 1..],
        None => DEFAULT_FILENAME,
    }
}
