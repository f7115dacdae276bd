//! Framing for instructions on a byte stream.
//!
//! Every frame starts with a [`FrameKind`] byte. Variable sized parts are a
//! big-endian length followed by the bytes; metadata travels as JSON and file
//! contents travel raw, after a header carrying their SHA-256.

use crate::{
    application::network::interface::{TransportError, TransportResult},
    domain::{
        DeleteOutcome, FileName, FilePayload, Instruction, MAX_FRAME_SIZE, SyncItem, SyncResponse,
    },
    infra::network::tcp::kind::{FrameKind, ItemKind},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Serialize, Deserialize)]
struct FileHeader {
    name: FileName,
    hash: String,
}

#[derive(Serialize, Deserialize)]
struct NameHeader {
    name: FileName,
}

pub async fn write_instruction<W: AsyncWrite + Unpin>(
    writer: &mut W,
    instruction: &Instruction,
) -> TransportResult<()> {
    let frame = encode(instruction)?;

    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

pub fn encode(instruction: &Instruction) -> TransportResult<Vec<u8>> {
    let mut buf = vec![FrameKind::from(instruction) as u8];

    match instruction {
        Instruction::SyncRequest(known) => put_json(&mut buf, known)?,
        Instruction::SyncResponse(SyncResponse::UpToDate) => {}
        Instruction::SyncResponse(SyncResponse::Items(items)) => {
            let count = u32::try_from(items.len())
                .map_err(|_| TransportError::decode("too many sync items"))?;
            buf.extend_from_slice(&count.to_be_bytes());

            for item in items {
                match item {
                    SyncItem::FilePush(file) => {
                        buf.push(ItemKind::Push as u8);
                        put_file(&mut buf, file)?;
                    }
                    SyncItem::FileDrop(name) => {
                        buf.push(ItemKind::Drop as u8);
                        put_json(&mut buf, &NameHeader { name: name.clone() })?;
                    }
                }
            }
        }
        Instruction::Add(file) => put_file(&mut buf, file)?,
        Instruction::DeleteRequest(name) => {
            put_json(&mut buf, &NameHeader { name: name.clone() })?
        }
        Instruction::DeleteResponse(outcome) => buf.push(*outcome as u8),
    }

    Ok(buf)
}

fn put_json<T: Serialize>(buf: &mut Vec<u8>, value: &T) -> TransportResult<()> {
    let json = serde_json::to_vec(value)?;
    if json.len() > MAX_FRAME_SIZE {
        return Err(TransportError::decode("frame too large"));
    }

    buf.extend_from_slice(&(json.len() as u32).to_be_bytes());
    buf.extend_from_slice(&json);
    Ok(())
}

fn put_file(buf: &mut Vec<u8>, file: &FilePayload) -> TransportResult<()> {
    if file.contents.len() > MAX_FRAME_SIZE {
        return Err(TransportError::decode(format!(
            "file too large to send: {}",
            file.name
        )));
    }

    let header = FileHeader {
        name: file.name.clone(),
        hash: hex::encode(Sha256::digest(&file.contents)),
    };
    put_json(buf, &header)?;

    buf.extend_from_slice(&(file.contents.len() as u64).to_be_bytes());
    buf.extend_from_slice(&file.contents);
    Ok(())
}

pub async fn read_instruction<R: AsyncRead + Unpin>(reader: &mut R) -> TransportResult<Instruction> {
    let kind = FrameKind::try_from(reader.read_u8().await?)?;

    let instruction = match kind {
        FrameKind::SyncRequest => Instruction::SyncRequest(read_json(reader).await?),
        FrameKind::SyncUpToDate => Instruction::SyncResponse(SyncResponse::UpToDate),
        FrameKind::SyncItems => {
            let count = reader.read_u32().await?;
            let mut items = Vec::new();

            for _ in 0..count {
                let item = match ItemKind::try_from(reader.read_u8().await?)? {
                    ItemKind::Push => SyncItem::FilePush(read_file(reader).await?),
                    ItemKind::Drop => {
                        SyncItem::FileDrop(read_json::<_, NameHeader>(reader).await?.name)
                    }
                };
                items.push(item);
            }

            Instruction::SyncResponse(SyncResponse::Items(items))
        }
        FrameKind::Add => Instruction::Add(read_file(reader).await?),
        FrameKind::DeleteRequest => {
            Instruction::DeleteRequest(read_json::<_, NameHeader>(reader).await?.name)
        }
        FrameKind::DeleteResponse => {
            let outcome = DeleteOutcome::try_from(reader.read_u8().await?).map_err(|byte| {
                TransportError::decode(format!("invalid delete outcome {byte}"))
            })?;
            Instruction::DeleteResponse(outcome)
        }
    };

    Ok(instruction)
}

async fn read_bytes<R: AsyncRead + Unpin>(reader: &mut R, len: u64) -> TransportResult<Vec<u8>> {
    if len > MAX_FRAME_SIZE as u64 {
        return Err(TransportError::decode(format!("frame too large: {len} bytes")));
    }

    let mut buf = vec![0u8; len as usize];
    reader.read_exact(&mut buf).await?;
    Ok(buf)
}

async fn read_json<R: AsyncRead + Unpin, T: DeserializeOwned>(
    reader: &mut R,
) -> TransportResult<T> {
    let len = reader.read_u32().await?;
    let json = read_bytes(reader, len as u64).await?;

    Ok(serde_json::from_slice(&json)?)
}

async fn read_file<R: AsyncRead + Unpin>(reader: &mut R) -> TransportResult<FilePayload> {
    let header: FileHeader = read_json(reader).await?;

    let size = reader.read_u64().await?;
    let contents = read_bytes(reader, size).await?;

    let computed_hash = hex::encode(Sha256::digest(&contents));
    if computed_hash != header.hash {
        return Err(TransportError::decode(
            "Hash mismatch: data corruption detected",
        ));
    }

    Ok(FilePayload::new(header.name, contents))
}
