/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use std::collections::HashSet;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use vk_backup::BackupError;
use vk_backup::disk::DiskStatus;
use vk_backup::export::{PhotoSink, PhotoSource, TransferItem};
use vk_backup::vk::{AlbumId, Likes, PhotoRecord, SizeVariant, VkClient};

// Builds a photo with the given (type, width, height) sizes
#[allow(dead_code)]
pub(crate) fn photo(likes: u64, date: &str, sizes: &[(&str, u32, u32)]) -> PhotoRecord {
    PhotoRecord {
        id: 0,
        owner_id: 1,
        sizes: sizes
            .iter()
            .map(|(t, w, h)| SizeVariant {
                url: format!("https://sun9.userapi.com/{}/{}.jpg", date, t),
                size_type: t.to_string(),
                width: *w,
                height: *h,
            })
            .collect(),
        likes: Likes {
            count: likes,
            user_likes: 0,
        },
        date: date.into(),
    }
}

// Source handing out a fixed list of photos, or failing
#[allow(dead_code)]
pub(crate) struct FakeSource {
    pub photos: Vec<PhotoRecord>,
    pub fail: bool,
}

impl PhotoSource for FakeSource {
    async fn fetch_photos(
        &self,
        _album: &AlbumId,
        limit: usize,
    ) -> Result<Vec<PhotoRecord>, BackupError> {
        if self.fail {
            return Err(BackupError::ApiResponse(
                5,
                "User authorization failed".into(),
            ));
        }
        Ok(self.photos.iter().take(limit).cloned().collect())
    }
}

// Sink remembering what it was asked to do
#[allow(dead_code)]
#[derive(Default)]
pub(crate) struct FakeSink {
    pub prepare_status: Option<DiskStatus>,
    pub reject: HashSet<String>,
    pub prepared: Mutex<bool>,
    pub stored: Mutex<Vec<TransferItem>>,
}

#[allow(dead_code)]
impl FakeSink {
    pub fn rejecting(names: &[&str]) -> Self {
        Self {
            reject: names.iter().map(|v| v.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn stored_names(&self) -> Vec<String> {
        self.stored
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.file_name.clone())
            .collect()
    }
}

impl PhotoSink for FakeSink {
    const ACTION: &'static str = "Faked";

    async fn prepare(&self) -> Result<(), BackupError> {
        *self.prepared.lock().unwrap() = true;
        match self.prepare_status {
            None | Some(DiskStatus::Created) | Some(DiskStatus::AlreadyExists) => Ok(()),
            Some(status) => Err(BackupError::FolderCreation(status)),
        }
    }

    async fn store(&self, item: &TransferItem) -> Result<(), BackupError> {
        if self.reject.contains(&item.file_name) {
            return Err(BackupError::Upload {
                file_name: item.file_name.clone(),
                status: DiskStatus::Other(507),
            });
        }
        self.stored.lock().unwrap().push(item.clone());
        Ok(())
    }
}

#[allow(dead_code)]
pub(crate) fn vk_client_from_env() -> anyhow::Result<VkClient> {
    let token = std::env::var("VK_ACCESS_TOKEN")?;
    let user_id = std::env::var("VK_USER_ID")?;
    Ok(VkClient::new(&token, &user_id))
}

// Local HTTP server answering each connection with the next canned response
#[allow(dead_code)]
pub(crate) struct CannedServer {
    listener: TcpListener,
    pub origin: String,
}

#[allow(dead_code)]
impl CannedServer {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let origin = format!("http://{}", listener.local_addr()?);
        Ok(Self { listener, origin })
    }

    // Serves (status, body) pairs in order and hands back the request lines it saw
    pub fn serve(self, responses: Vec<(u16, String)>) -> JoinHandle<Vec<String>> {
        tokio::spawn(async move {
            let mut request_lines = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = self.listener.accept().await.unwrap();
                request_lines.push(read_request(&mut socket).await);
                let resp = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(resp.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            request_lines
        })
    }
}

// Reads one request, body included, and returns its request line
async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        let n = socket.read(&mut buf).await.unwrap();
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        if n == 0 {
            break data.len();
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while data.len() < header_end + content_length {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    head.lines().next().unwrap_or_default().to_string()
}
