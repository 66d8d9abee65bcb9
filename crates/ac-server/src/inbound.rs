//! Inbound webhook fields, accepted under English or Spanish names.

use ac_core::InboundMessage;
use serde_json::Value;
use std::collections::HashMap;

pub type Fields = HashMap<String, String>;

pub const BODY_KEYS: [&str; 4] = ["Body", "Cuerpo", "body", "Mensaje"];
pub const FROM_KEYS: [&str; 3] = ["From", "De", "from"];
pub const WA_ID_KEYS: [&str; 6] = ["WaId", "waId", "WAID", "WaID", "Identificador de la wa", "Id. de wa"];
pub const PROFILE_KEYS: [&str; 3] = ["ProfileName", "Nombre del perfil", "profileName"];
pub const CHANNEL_METADATA_KEYS: [&str; 3] = ["ChannelMetadata", "Metadatos del canal", "channelMetadata"];

const METADATA_WA_ID_KEYS: [&str; 3] = ["Id. de wa", "wa_id", "WaId"];

/// Flatten a JSON object body into fields. Nested values are kept as JSON
/// text and nulls are dropped; anything but an object yields no fields.
pub fn fields_from_json(value: &Value) -> Fields {
    let Some(obj) = value.as_object() else {
        return Fields::new();
    };
    obj.iter()
        .filter_map(|(k, v)| {
            let text = match v {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((k.clone(), text))
        })
        .collect()
}

/// Value of the first key present in `fields`, even if blank.
pub fn pick<'a>(fields: &'a Fields, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| fields.get(*k)).map(String::as_str)
}

/// Digits of a `whatsapp:+5215512345678` sender address.
pub fn wa_id_from_sender(from: &str) -> Option<String> {
    const SCHEME: &str = "whatsapp:";
    let start = from.to_ascii_lowercase().find(SCHEME)? + SCHEME.len();
    let rest = &from[start..];
    let rest = rest.strip_prefix('+').unwrap_or(rest);
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

/// WhatsApp id carried in the channel metadata JSON, under either
/// `datos.contexto` or `context`.
pub fn wa_id_from_channel_metadata(raw: &str) -> Option<String> {
    let json: Value = serde_json::from_str(raw).ok()?;
    let ctx = json
        .pointer("/datos/contexto")
        .filter(|v| v.is_object())
        .or_else(|| json.get("context"))?;
    METADATA_WA_ID_KEYS.iter().find_map(|k| match ctx.get(*k)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Build the message from webhook fields.
///
/// The wa id falls back to the sender address and then to the channel
/// metadata when no explicit id field is present.
pub fn parse_inbound(fields: &Fields) -> InboundMessage {
    let body = pick(fields, &BODY_KEYS).unwrap_or_default();
    let from = pick(fields, &FROM_KEYS).unwrap_or_default();

    let wa_id = pick(fields, &WA_ID_KEYS)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| wa_id_from_sender(from))
        .or_else(|| pick(fields, &CHANNEL_METADATA_KEYS).and_then(wa_id_from_channel_metadata))
        .unwrap_or_default();

    let mut msg = InboundMessage::new(from, body).with_wa_id(wa_id);
    if let Some(profile) = pick(fields, &PROFILE_KEYS).filter(|p| !p.trim().is_empty()) {
        msg = msg.with_profile(profile);
    }
    msg
}
