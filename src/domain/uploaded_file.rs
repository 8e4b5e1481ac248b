/// File content received from the page, forwarded to the backend as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: String, content_type: Option<String>, data: Vec<u8>) -> Self {
        Self {
            file_name,
            content_type,
            data,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
