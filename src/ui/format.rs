const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

/// 把字节数换算成不超过 1000 的数值和单位
///
/// 每级除以 1000，最大到 GiB，更大的值仍以 GiB 表示。
pub fn format_size(size: u64) -> (f64, &'static str) {
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1000.0 && unit_index < UNITS.len() - 1 {
        size /= 1000.0;
        unit_index += 1;
    }

    (size, UNITS[unit_index])
}
