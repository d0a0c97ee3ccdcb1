use std::collections::BTreeMap;
use std::path::PathBuf;

use bytes::{BufMut, Bytes, BytesMut};
use futures_util::stream;
use log::debug;
use pandasign_core::{Body, Error, Result};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

use crate::constants::*;

const CHUNK_SIZE: usize = 64 * 1024;
const CHANNEL_CAPACITY: usize = 4;

/// A multipart/form-data upload of one local file.
///
/// Every field becomes a form part ahead of the file part. The body is
/// produced by a background task and never holds the whole file in memory.
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    file: PathBuf,
    fields: BTreeMap<String, String>,
}

impl MultipartUpload {
    /// Create an upload of `file` without extra fields.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set the form fields sent ahead of the file.
    pub fn with_fields(mut self, fields: BTreeMap<String, String>) -> Self {
        self.fields = fields;
        self
    }

    /// Value for the `Content-Type` header of this upload.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")
    }

    fn preamble(&self) -> Bytes {
        let file = self.file.to_string_lossy();

        let mut buf = BytesMut::new();
        for (k, v) in &self.fields {
            buf.put_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
            buf.put_slice(format!("Content-Disposition: form-data; name=\"{k}\"\r\n\r\n").as_bytes());
            buf.put_slice(format!("{v}\r\n").as_bytes());
        }

        buf.put_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        buf.put_slice(
            format!("Content-Disposition: form-data; name=\"{file}\"; filename=\"{file}\"\r\n")
                .as_bytes(),
        );
        buf.put_slice(format!("Content-Type: {OCTET_STREAM}\r\n\r\n").as_bytes());
        buf.freeze()
    }

    fn epilogue() -> Bytes {
        Bytes::from(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n"))
    }

    /// Open the file and build the streaming body.
    ///
    /// Returns the body together with its exact length. Failing to open or
    /// stat the file is reported here; a read failure later on ends the
    /// body stream with that error.
    pub async fn into_body(self) -> Result<(Body, u64)> {
        let mut file = File::open(&self.file).await.map_err(|e| {
            Error::request_invalid(format!("failed to open {}", self.file.display()))
                .with_source(e)
        })?;
        let file_size = file.metadata().await?.len();

        let preamble = self.preamble();
        let epilogue = Self::epilogue();
        let content_length = preamble.len() as u64 + file_size + epilogue.len() as u64;
        debug!(
            "multipart upload of {} with {} fields, {content_length} bytes",
            self.file.display(),
            self.fields.len()
        );

        let (tx, rx) = mpsc::channel::<std::io::Result<Bytes>>(CHANNEL_CAPACITY);
        tokio::spawn(async move {
            if tx.send(Ok(preamble)).await.is_err() {
                return;
            }

            loop {
                let mut buf = BytesMut::with_capacity(CHUNK_SIZE);
                match file.read_buf(&mut buf).await {
                    Ok(0) => break,
                    Ok(_) => {
                        if tx.send(Ok(buf.freeze())).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e)).await;
                        return;
                    }
                }
            }

            let _ = tx.send(Ok(epilogue)).await;
        });

        let body = Body::from_stream(stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|chunk| (chunk, rx))
        }));

        Ok((body, content_length))
    }
}
