// Copyright 2026 Anapaya Systems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Decodes NDN-TLV packets and prints their canonical form.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use bytes::Bytes;
use clap::{Parser, ValueEnum};
use ndn_packet::{
    Data, Interest, Link, PacketConfig, WireFormat,
    control::{ControlParameters, ControlResponse},
    key_locator::{KeyLocator, KeyLocatorKind},
    meta_info::ContentType,
    tlv::{TlvWireFormat, types},
};
use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Kind of packet in the input.
    #[arg(value_enum, default_value_t = PacketKind::Auto)]
    kind: PacketKind,
    /// Input file, `-` for stdin.
    #[arg(default_value = "-")]
    input: PathBuf,
    /// Codec configuration file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
    /// The input is hex text instead of raw bytes.
    #[arg(long)]
    hex: bool,
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PacketKind {
    /// Detect the kind from the outer TLV type.
    Auto,
    Interest,
    Data,
    Link,
    Nack,
    ControlParameters,
    ControlResponse,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            PacketConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => PacketConfig::default(),
    };
    let format = TlvWireFormat::with_config(config);

    let input = read_input(&cli.input, cli.hex)?;
    let kind = match cli.kind {
        PacketKind::Auto => detect_kind(&input)?,
        kind => kind,
    };
    tracing::debug!(?kind, len = input.len(), "decoding");

    let dump = decode(&format, kind, input)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&dump.json)?);
    } else {
        for line in dump.lines {
            println!("{line}");
        }
    }
    Ok(())
}

fn read_input(path: &Path, hex_input: bool) -> anyhow::Result<Bytes> {
    let raw = if path == Path::new("-") {
        let mut raw = Vec::new();
        std::io::stdin()
            .read_to_end(&mut raw)
            .context("reading stdin")?;
        raw
    } else {
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
    };

    if !hex_input {
        return Ok(raw.into());
    }
    let text: String = String::from_utf8(raw)
        .context("hex input is not text")?
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    Ok(hex::decode(&text).context("invalid hex input")?.into())
}

/// Picks the packet kind from the type of the outermost element.
fn detect_kind(input: &[u8]) -> anyhow::Result<PacketKind> {
    let tlv_type = match *input {
        [] => bail!("empty input"),
        [0xfd, hi, lo, ..] => u64::from(u16::from_be_bytes([hi, lo])),
        [first, ..] => u64::from(first),
    };
    Ok(match tlv_type {
        types::INTEREST => PacketKind::Interest,
        types::DATA => PacketKind::Data,
        types::LP_NACK => PacketKind::Nack,
        types::CONTROL_PARAMETERS => PacketKind::ControlParameters,
        types::CONTROL_RESPONSE => PacketKind::ControlResponse,
        other => bail!("cannot detect packet kind of TLV type {other:#x}"),
    })
}

/// A decoded packet in both output forms.
struct Dump {
    lines: Vec<String>,
    json: Value,
}

fn decode(format: &TlvWireFormat, kind: PacketKind, input: Bytes) -> anyhow::Result<Dump> {
    let dump = match kind {
        PacketKind::Interest => {
            let mut interest = Interest::new();
            interest
                .wire_decode_with(input, format)
                .context("decoding interest")?;
            dump_interest(&interest, format.config())
        }
        PacketKind::Data => {
            let mut data = Data::new();
            data.wire_decode_with(input, format)
                .context("decoding data")?;
            if data.meta_info().content_type() == ContentType::Link {
                dump_link(&Link::from_data(data)?)
            } else {
                dump_data(&data)?
            }
        }
        PacketKind::Link => {
            let mut data = Data::new();
            data.wire_decode_with(input, format)
                .context("decoding link")?;
            dump_link(&Link::from_data(data)?)
        }
        PacketKind::Nack => {
            let nack = format
                .decode_network_nack(&input)
                .context("decoding nack")?;
            let reason = format!("{:?}", nack.reason());
            Dump {
                lines: vec![format!("Nack reason={reason}")],
                json: json!({ "kind": "nack", "reason": reason }),
            }
        }
        PacketKind::ControlParameters => {
            let parameters = format
                .decode_control_parameters(&input)
                .context("decoding control parameters")?;
            let json = control_parameters_json(&parameters);
            Dump {
                lines: vec![format!("ControlParameters {json}")],
                json,
            }
        }
        PacketKind::ControlResponse => {
            let response = format
                .decode_control_response(&input)
                .context("decoding control response")?;
            dump_control_response(&response)
        }
        PacketKind::Auto => bail!("packet kind must be resolved before decoding"),
    };
    Ok(dump)
}

fn dump_interest(interest: &Interest, config: &PacketConfig) -> Dump {
    let nonce = hex::encode(interest.nonce());
    let lifetime_ms = interest.effective_lifetime(config).as_millis();
    let lines = vec![
        format!("Interest {}", interest.to_uri()),
        format!("  nonce: {nonce}"),
        format!("  lifetime: {lifetime_ms} ms"),
        format!("  must be fresh: {}", interest.must_be_fresh()),
        format!("  key locator: {}", describe_key_locator(interest.key_locator())),
        format!("  link: {}", interest.has_link()),
    ];
    let json = json!({
        "kind": "interest",
        "uri": interest.to_uri(),
        "name": interest.name().to_uri(),
        "nonce": nonce,
        "lifetime_ms": lifetime_ms as u64,
        "must_be_fresh": interest.must_be_fresh(),
        "scope": interest.scope(),
        "selected_delegation": interest.selected_delegation_index(),
    });
    Dump { lines, json }
}

fn dump_data(data: &Data) -> anyhow::Result<Dump> {
    let full_name = data.full_name().context("computing full name")?;
    let meta_info = data.meta_info();
    let content_type = format!("{:?}", meta_info.content_type());
    let freshness_ms = meta_info.freshness_period().map(|p| p.as_millis() as u64);
    let final_block_id = meta_info.final_block_id().map(|c| c.to_uri());
    let signature_type = data
        .signature()
        .signature_type()
        .map(|t| format!("{t:?}"));
    let key_locator = data
        .signature()
        .key_locator()
        .map(describe_key_locator)
        .unwrap_or_else(|| "none".to_string());

    let mut lines = vec![
        format!("Data {}", data.name()),
        format!("  full name: {full_name}"),
        format!("  content type: {content_type}"),
    ];
    if let Some(ms) = freshness_ms {
        lines.push(format!("  freshness: {ms} ms"));
    }
    if let Some(id) = &final_block_id {
        lines.push(format!("  final block: {id}"));
    }
    lines.push(format!("  content: {} bytes", data.content().len()));
    lines.push(format!(
        "  signature: {} key locator: {key_locator}",
        signature_type.as_deref().unwrap_or("unknown")
    ));

    let json = json!({
        "kind": "data",
        "name": data.name().to_uri(),
        "full_name": full_name.to_uri(),
        "content_type": content_type,
        "freshness_ms": freshness_ms,
        "final_block_id": final_block_id,
        "content": hex::encode(data.content()),
        "signature_type": signature_type,
        "key_locator": key_locator,
        "signature": hex::encode(data.signature().signature()),
    });
    Ok(Dump { lines, json })
}

fn dump_link(link: &Link) -> Dump {
    let mut lines = vec![format!("Link {}", link.name())];
    let mut delegations = Vec::new();
    for delegation in link.delegations() {
        lines.push(format!(
            "  {} {}",
            delegation.preference, delegation.name
        ));
        delegations.push(json!({
            "preference": delegation.preference,
            "name": delegation.name.to_uri(),
        }));
    }
    let json = json!({
        "kind": "link",
        "name": link.name().to_uri(),
        "delegations": delegations,
    });
    Dump { lines, json }
}

fn dump_control_response(response: &ControlResponse) -> Dump {
    let body = response.body.as_ref().map(control_parameters_json);
    let mut lines = vec![format!(
        "ControlResponse {} {}",
        response.status_code, response.status_text
    )];
    if let Some(body) = &body {
        lines.push(format!("  body: {body}"));
    }
    let json = json!({
        "kind": "control-response",
        "status_code": response.status_code,
        "status_text": response.status_text,
        "body": body,
    });
    Dump { lines, json }
}

fn control_parameters_json(parameters: &ControlParameters) -> Value {
    json!({
        "name": parameters.name.as_ref().map(|n| n.to_uri()),
        "face_id": parameters.face_id,
        "uri": parameters.uri,
        "local_control_feature": parameters.local_control_feature,
        "origin": parameters.origin,
        "cost": parameters.cost,
        "child_inherit": parameters.forwarding_flags.child_inherit(),
        "capture": parameters.forwarding_flags.capture(),
        "strategy": parameters.strategy.as_ref().map(|n| n.to_uri()),
        "expiration_ms": parameters.expiration_period.map(|p| p.as_millis() as u64),
    })
}

fn describe_key_locator(key_locator: &KeyLocator) -> String {
    match key_locator.kind() {
        KeyLocatorKind::None => "none".to_string(),
        KeyLocatorKind::Key(key) => format!("key ({} bytes)", key.len()),
        KeyLocatorKind::Certificate(cert) => format!("certificate ({} bytes)", cert.len()),
        KeyLocatorKind::KeyLocatorDigest(digest) => format!("digest {}", hex::encode(digest)),
        KeyLocatorKind::KeyName { name, .. } => format!("name {}", name.get()),
    }
}

#[cfg(test)]
mod tests {
    use ndn_packet::{Name, nack::NetworkNack};

    use super::*;

    #[test]
    fn should_detect_kind_from_outer_type() {
        let data = Data::with_name(Name::from_uri("/a").unwrap());
        let encoding = data.wire_encode().unwrap();
        assert_eq!(detect_kind(encoding.bytes()).unwrap(), PacketKind::Data);

        let nack = NetworkNack::new().wire_encode().unwrap();
        assert_eq!(detect_kind(&nack).unwrap(), PacketKind::Nack);

        assert!(detect_kind(&[]).is_err());
        assert!(detect_kind(&[0x42, 0]).is_err());
    }

    #[test]
    fn should_dump_interest_uri() {
        let mut interest = Interest::with_name(Name::from_uri("/a/b").unwrap());
        interest.set_nonce(vec![0xde, 0xad, 0xbe, 0xef]);
        let encoding = interest.wire_encode().unwrap();

        let format = TlvWireFormat::new();
        let dump = decode(&format, PacketKind::Interest, encoding.into_bytes()).unwrap();
        assert_eq!(dump.lines[0], "Interest /a/b?ndn.Nonce=%DE%AD%BE%EF");
        assert_eq!(dump.json["nonce"], "deadbeef");
    }

    #[test]
    fn should_dump_stale_answer_origin_kind() {
        let mut interest = Interest::with_name(Name::from_uri("/a/b").unwrap());
        interest.set_must_be_fresh(false);
        interest.set_nonce(vec![0xde, 0xad, 0xbe, 0xef]);
        let encoding = interest.wire_encode().unwrap();

        let format = TlvWireFormat::new();
        let dump = decode(&format, PacketKind::Interest, encoding.into_bytes()).unwrap();
        // No MustBeFresh on the wire, stale answers are allowed.
        assert_eq!(
            dump.lines[0],
            "Interest /a/b?ndn.AnswerOriginKind=4&ndn.Nonce=%DE%AD%BE%EF"
        );
    }

    #[test]
    fn should_dump_link_delegations() {
        let mut link = Link::with_name(Name::from_uri("/link").unwrap());
        link.add_delegation(10, Name::from_uri("/a").unwrap()).unwrap();
        let encoding = link.wire_encode().unwrap();

        let format = TlvWireFormat::new();
        let dump = decode(&format, PacketKind::Data, encoding.into_bytes()).unwrap();
        assert_eq!(dump.lines, ["Link /link", "  10 /a"]);
    }
}
