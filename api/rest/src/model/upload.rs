use std::path::Path;

use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use serde::Serialize;

/// The multipart field the upload route reads its file from.
pub trait UploadReqForm {
    fn file(&self) -> &Option<TempFile>;

    fn file_path(&self) -> Option<&Path> {
        self.file().as_ref().map(|file| file.file.path())
    }

    fn file_name(&self) -> Option<String> {
        self.file().as_ref().and_then(|file| file.file_name.clone())
    }

    fn size(&self) -> usize {
        self.file().as_ref().map_or(0, |file| file.size)
    }
}

#[derive(MultipartForm)]
pub struct UploadImageReqForm {
    #[multipart(rename = "profileImage")]
    profile_image: Option<TempFile>,
}

impl UploadReqForm for UploadImageReqForm {
    fn file(&self) -> &Option<TempFile> {
        &self.profile_image
    }
}

#[derive(MultipartForm)]
pub struct UploadLogoReqForm {
    logo: Option<TempFile>,
}

impl UploadReqForm for UploadLogoReqForm {
    fn file(&self) -> &Option<TempFile> {
        &self.logo
    }
}

#[derive(MultipartForm)]
pub struct UploadDocumentReqForm {
    document: Option<TempFile>,
}

impl UploadReqForm for UploadDocumentReqForm {
    fn file(&self) -> &Option<TempFile> {
        &self.document
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResJson {
    image_url: String,
}

impl UploadImageResJson {
    pub fn new(image_url: &str) -> Self {
        Self {
            image_url: image_url.to_owned(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileResJson {
    file_url: String,
}

impl UploadFileResJson {
    pub fn new(file_url: &str) -> Self {
        Self {
            file_url: file_url.to_owned(),
        }
    }
}
