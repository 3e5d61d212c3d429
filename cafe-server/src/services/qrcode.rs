//! QR code rendering for table ordering links

use std::io::Cursor;

use base64::Engine;
use image::{ImageFormat, Luma};
use qrcode::QrCode;

use crate::BoxError;

/// Minimum rendered size in pixels
const MIN_DIMENSION: u32 = 256;

/// Customer ordering URL for a table
pub fn table_order_url(base: &str, table_id: i64) -> String {
    format!("{}/order/{}", base.trim_end_matches('/'), table_id)
}

/// Render `text` as a PNG QR code, encoded as a `data:` URL
pub fn render_png_data_url(text: &str) -> Result<String, BoxError> {
    let code = QrCode::new(text.as_bytes())?;
    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .build();

    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(&buffer);
    Ok(format!("data:image/png;base64,{encoded}"))
}
