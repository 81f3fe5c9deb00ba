use plotters::style::{FontDesc, FontFamily, FontStyle};

/// plotters resolves text through system fonts; without one every chart fails
/// to draw its caption.
pub fn has_system_font() -> bool {
    let font = FontDesc::new(FontFamily::SansSerif, 12.0, FontStyle::Normal);
    match font.box_size("Time (s)") {
        Ok(_) => true,
        Err(e) => {
            eprintln!("skipping: no usable sans-serif font ({e})");
            false
        }
    }
}
