use crate::domain::entities::record::EmdStatus;

pub fn root_container_style() -> &'static str {
    "font-family: sans-serif; padding: 12px; background: #fff; height: 100vh; display: flex; flex-direction: column; gap: 8px; box-sizing: border-box;"
}

pub fn toolbar_style() -> &'static str {
    "display: flex; gap: 8px; align-items: center; flex-wrap: wrap; padding: 8px 0;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd; border-radius: 6px;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; background: #f5f5f5; border-bottom: 1px solid #bbb; padding: 6px 10px; text-align: left; white-space: nowrap;"
}

/// Numbers read right-aligned, everything else left.
pub fn table_cell_style(numeric: bool) -> String {
    let align = if numeric { "right" } else { "left" };
    format!("padding: 4px 10px; border-bottom: 1px solid #eee; text-align: {align}; white-space: nowrap;")
}

pub fn status_badge_style(status: EmdStatus) -> String {
    let (background, color) = match status {
        EmdStatus::Refunded => ("#e6f4ea", "#1e7e34"),
        EmdStatus::Pending => ("#fff4e5", "#b45309"),
    };
    format!("padding: 2px 8px; border-radius: 10px; background: {background}; color: {color};")
}

pub fn notice_style() -> &'static str {
    "padding: 8px 10px; border: 1px solid #f0c36d; background: #fffbe6; border-radius: 6px;"
}

pub fn error_style() -> &'static str {
    "padding: 8px 10px; border: 1px solid #e0a0a0; background: #fdecea; border-radius: 6px;"
}
