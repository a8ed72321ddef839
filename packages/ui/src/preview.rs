//! Local previews of files chosen in the browser, before they are uploaded.

use api::AvatarUpload;

/// A `blob:` URL for a chosen file. The URL is revoked when this is dropped, so
/// replacing or discarding the value releases the browser's copy.
#[derive(Debug, PartialEq)]
pub struct PreviewUrl {
    url: String,
}

impl PreviewUrl {
    /// `None` outside the browser or when the browser refuses the blob.
    pub fn create(upload: &AvatarUpload) -> Option<Self> {
        #[cfg(target_arch = "wasm32")]
        {
            let bytes = js_sys::Uint8Array::from(upload.bytes.as_slice());
            let parts = js_sys::Array::of1(&bytes);
            let options = web_sys::BlobPropertyBag::new();
            options.set_type(upload.mime());
            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(|e| tracing::warn!("avatar preview blob failed: {e:?}"))
                .ok()?;
            let url = web_sys::Url::create_object_url_with_blob(&blob)
                .map_err(|e| tracing::warn!("avatar preview url failed: {e:?}"))
                .ok()?;
            Some(Self { url })
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::debug!("no preview for {} outside the browser", upload.file_name);
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        if let Err(e) = web_sys::Url::revoke_object_url(&self.url) {
            tracing::warn!("failed to revoke {}: {e:?}", self.url);
        }
    }
}
