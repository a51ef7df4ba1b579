use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use mime::Mime;
use serde::{Deserialize, Serialize};

const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Inline applicant photo stored as a `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoPayload(String);

/// Image bytes recovered from a [`PhotoPayload`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPhoto {
    pub mime: Mime,
    pub bytes: Vec<u8>,
}

impl DecodedPhoto {
    pub fn is_jpeg(&self) -> bool {
        self.mime.essence_str() == mime::IMAGE_JPEG.essence_str()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("photo payload is not a data URL")]
    NotDataUrl,
    #[error("photo payload is not base64 encoded")]
    NotBase64,
    #[error("photo media type is invalid: {0}")]
    InvalidMime(#[from] mime::FromStrError),
    #[error("photo media type {0} is not supported (expected image/jpeg or image/png)")]
    UnsupportedMime(String),
    #[error("photo payload failed to decode: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("photo bytes do not match the declared {0} format")]
    SignatureMismatch(String),
    #[error("photo bytes are neither JPEG nor PNG")]
    UnknownFormat,
}

impl PhotoPayload {
    pub fn from_data_url(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Encode raw image bytes the way a browser file reader would.
    pub fn encode(mime: &Mime, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime.essence_str(), B64.encode(bytes)))
    }

    /// Encode raw image bytes, taking the media type from the file signature.
    pub fn from_image_bytes(bytes: &[u8]) -> Result<Self, PhotoError> {
        let mime = if bytes.starts_with(JPEG_SIGNATURE) {
            mime::IMAGE_JPEG
        } else if bytes.starts_with(PNG_SIGNATURE) {
            mime::IMAGE_PNG
        } else {
            return Err(PhotoError::UnknownFormat);
        };
        Ok(Self::encode(&mime, bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn decode(&self) -> Result<DecodedPhoto, PhotoError> {
        let rest = self
            .0
            .trim()
            .strip_prefix("data:")
            .ok_or(PhotoError::NotDataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(PhotoError::NotDataUrl)?;
        let media_type = header
            .strip_suffix(";base64")
            .ok_or(PhotoError::NotBase64)?;

        let mime: Mime = media_type.parse()?;
        let signature = match mime.essence_str() {
            "image/jpeg" => JPEG_SIGNATURE,
            "image/png" => PNG_SIGNATURE,
            other => return Err(PhotoError::UnsupportedMime(other.to_string())),
        };

        let bytes = B64.decode(payload.trim())?;
        if !bytes.starts_with(signature) {
            return Err(PhotoError::SignatureMismatch(mime.essence_str().to_string()));
        }

        Ok(DecodedPhoto { mime, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg_bytes() -> Vec<u8> {
        vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]
    }

    #[test]
    fn decodes_encoded_jpeg() {
        let payload = PhotoPayload::encode(&mime::IMAGE_JPEG, &jpeg_bytes());
        assert!(payload.as_str().starts_with("data:image/jpeg;base64,"));

        let decoded = payload.decode().expect("valid jpeg payload");
        assert!(decoded.is_jpeg());
        assert_eq!(decoded.bytes, jpeg_bytes());
    }

    #[test]
    fn rejects_plain_strings() {
        let payload = PhotoPayload::from_data_url("not a photo");
        assert!(matches!(payload.decode(), Err(PhotoError::NotDataUrl)));
    }

    #[test]
    fn rejects_unsupported_media_types() {
        let payload = PhotoPayload::encode(&mime::IMAGE_GIF, b"GIF89a");
        assert!(matches!(
            payload.decode(),
            Err(PhotoError::UnsupportedMime(kind)) if kind == "image/gif"
        ));
    }

    #[test]
    fn rejects_corrupt_base64() {
        let payload = PhotoPayload::from_data_url("data:image/png;base64,@@@@");
        assert!(matches!(payload.decode(), Err(PhotoError::Base64(_))));
    }

    #[test]
    fn rejects_bytes_that_are_not_the_declared_format() {
        let payload = PhotoPayload::encode(&mime::IMAGE_PNG, &jpeg_bytes());
        assert!(matches!(
            payload.decode(),
            Err(PhotoError::SignatureMismatch(_))
        ));
    }

    #[test]
    fn media_type_follows_the_file_signature() {
        let jpeg = PhotoPayload::from_image_bytes(&jpeg_bytes()).expect("jpeg signature");
        assert!(jpeg.as_str().starts_with("data:image/jpeg;base64,"));

        let png = PhotoPayload::from_image_bytes(PNG_SIGNATURE).expect("png signature");
        assert!(png.as_str().starts_with("data:image/png;base64,"));

        assert!(matches!(
            PhotoPayload::from_image_bytes(b"GIF89a"),
            Err(PhotoError::UnknownFormat)
        ));
    }
}
