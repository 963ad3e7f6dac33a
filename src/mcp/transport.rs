//! Transporte de linhas JSON para o serviço.
//!
//! Cada mensagem é um objeto JSON-RPC 2.0 completo em uma única linha,
//! terminada por `\n`:
//!
//! ```text
//! {"jsonrpc":"2.0","id":1,"method":"tools/list"}\n
//! {"jsonrpc":"2.0","id":1,"result":{...}}\n
//! ```

use std::io::{BufRead, BufReader, Stdin, Stdout, Write};

use crate::types::errors::CalcoreError;
use crate::CalcoreResult;

use super::protocol::{JsonRpcRequest, JsonRpcResponse};

/// Mensagem lida do cliente.
#[derive(Debug)]
pub enum Incoming {
    /// Request decodificada.
    Request(JsonRpcRequest),
    /// Linha que não é JSON-RPC válido (texto do erro de parse).
    Malformed(String),
    /// Fim da entrada.
    Eof,
}

/// Transporte sobre qualquer par leitor/escritor.
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

/// Transporte sobre stdin/stdout.
pub type StdioTransport = LineTransport<BufReader<Stdin>, Stdout>;

impl StdioTransport {
    pub fn stdio() -> Self {
        LineTransport::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Lê a próxima mensagem, pulando linhas em branco.
    pub fn read_message(&mut self) -> CalcoreResult<Incoming> {
        loop {
            let mut line = String::new();
            let bytes_read = self.reader.read_line(&mut line).map_err(CalcoreError::Io)?;

            if bytes_read == 0 {
                return Ok(Incoming::Eof);
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return Ok(match serde_json::from_str::<JsonRpcRequest>(trimmed) {
                Ok(request) => {
                    tracing::debug!(method = %request.method, id = ?request.id, "Received request");
                    Incoming::Request(request)
                }
                Err(e) => Incoming::Malformed(e.to_string()),
            });
        }
    }

    /// Escreve uma resposta como JSON compacto seguido de `\n`.
    pub fn write_response(&mut self, response: &JsonRpcResponse) -> CalcoreResult<()> {
        let body = serde_json::to_string(response)?;

        self.writer.write_all(body.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        tracing::debug!(id = ?response.id, is_error = response.is_error(), "Sent response");
        Ok(())
    }

    /// Devolve o leitor e o escritor.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
