//! Scene-file header: texture paths and floor/ceiling colors, followed by the
//! raw map body.

use std::path::PathBuf;

use crate::color::Rgb;
use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    North,
    South,
    West,
    East,
    Floor,
    Ceiling,
}

impl Key {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "NO" => Some(Key::North),
            "SO" => Some(Key::South),
            "WE" => Some(Key::West),
            "EA" => Some(Key::East),
            "F" => Some(Key::Floor),
            "C" => Some(Key::Ceiling),
            _ => None,
        }
    }

    fn token(self) -> &'static str {
        match self {
            Key::North => "NO",
            Key::South => "SO",
            Key::West => "WE",
            Key::East => "EA",
            Key::Floor => "F",
            Key::Ceiling => "C",
        }
    }
}

/// Paths of the four cardinal wall textures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallPaths {
    pub north: PathBuf,
    pub south: PathBuf,
    pub west: PathBuf,
    pub east: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneConfig {
    pub textures: WallPaths,
    pub floor: Rgb,
    pub ceiling: Rgb,
}

#[derive(Default)]
struct HeaderBuilder {
    north: Option<PathBuf>,
    south: Option<PathBuf>,
    west: Option<PathBuf>,
    east: Option<PathBuf>,
    floor: Option<Rgb>,
    ceiling: Option<Rgb>,
}

impl HeaderBuilder {
    fn set(&mut self, key: Key, value: &str) -> Result<(), ParseError> {
        match key {
            Key::North => put(&mut self.north, key, PathBuf::from(value)),
            Key::South => put(&mut self.south, key, PathBuf::from(value)),
            Key::West => put(&mut self.west, key, PathBuf::from(value)),
            Key::East => put(&mut self.east, key, PathBuf::from(value)),
            Key::Floor => {
                reject_duplicate(&self.floor, key)?;
                put(&mut self.floor, key, parse_color(key, value)?)
            }
            Key::Ceiling => {
                reject_duplicate(&self.ceiling, key)?;
                put(&mut self.ceiling, key, parse_color(key, value)?)
            }
        }
    }

    fn finish(self) -> Result<SceneConfig, ParseError> {
        let missing = |key: Key| ParseError::MissingKey(key.token());
        Ok(SceneConfig {
            textures: WallPaths {
                north: self.north.ok_or_else(|| missing(Key::North))?,
                south: self.south.ok_or_else(|| missing(Key::South))?,
                west: self.west.ok_or_else(|| missing(Key::West))?,
                east: self.east.ok_or_else(|| missing(Key::East))?,
            },
            floor: self.floor.ok_or_else(|| missing(Key::Floor))?,
            ceiling: self.ceiling.ok_or_else(|| missing(Key::Ceiling))?,
        })
    }
}

fn reject_duplicate<T>(slot: &Option<T>, key: Key) -> Result<(), ParseError> {
    match slot {
        Some(_) => Err(ParseError::DuplicateKey(key.token())),
        None => Ok(()),
    }
}

fn put<T>(slot: &mut Option<T>, key: Key, value: T) -> Result<(), ParseError> {
    reject_duplicate(slot, key)?;
    *slot = Some(value);
    Ok(())
}

/// Parses `r,g,b` with each component in 0..=255.
fn parse_color(key: Key, value: &str) -> Result<Rgb, ParseError> {
    let invalid = || ParseError::InvalidColor {
        key: key.token(),
        value: value.to_string(),
    };
    let parts: Vec<u8> = value
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid())?;
    match parts.as_slice() {
        &[r, g, b] => Ok(Rgb::new(r, g, b)),
        _ => Err(invalid()),
    }
}

/// Splits a scene file into its parsed header and the raw map rows.
///
/// The map body starts at the first line whose first non-whitespace
/// character is `1`. Every earlier non-blank line must be a header key.
/// Duplicate keys are rejected as soon as they are seen, before the body
/// is looked at. Trailing blank lines after the map are dropped; an empty
/// line anywhere inside the body is an error.
pub fn split_scene(text: &str) -> Result<(SceneConfig, Vec<&str>), ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut header = HeaderBuilder::default();
    let mut body_start = None;

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('1') {
            body_start = Some(idx);
            break;
        }
        let (token, value) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(|| ParseError::UnknownKey(trimmed.to_string()))?;
        let key =
            Key::from_token(token).ok_or_else(|| ParseError::UnknownKey(trimmed.to_string()))?;
        let value = value.trim();
        if value.is_empty() {
            return Err(ParseError::MissingKey(key.token()));
        }
        header.set(key, value)?;
    }

    let body_start = body_start.ok_or(ParseError::MissingMap)?;
    let config = header.finish()?;

    let mut body = &lines[body_start..];
    while let Some((last, rest)) = body.split_last() {
        if !last.trim().is_empty() {
            break;
        }
        body = rest;
    }
    if let Some(offset) = body.iter().position(|line| line.is_empty()) {
        return Err(ParseError::BlankLineInMap(body_start + offset + 1));
    }

    Ok((config, body.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = concat!(
        "NO ./tex/north.png\nSO ./tex/south.png\nWE ./tex/west.png\nEA ./tex/east.png\n",
        "F 220,100,0\nC 225,30,0\n",
    );

    #[test]
    fn header_and_body_are_split() {
        let text = format!("{HEADER}\n111\n1N1\n111\n");
        let (config, body) = split_scene(&text).unwrap();
        assert_eq!(config.textures.north, PathBuf::from("./tex/north.png"));
        assert_eq!(config.textures.east, PathBuf::from("./tex/east.png"));
        assert_eq!(config.floor, Rgb::new(220, 100, 0));
        assert_eq!(config.ceiling, Rgb::new(225, 30, 0));
        assert_eq!(body, vec!["111", "1N1", "111"]);
    }

    #[test]
    fn header_order_is_irrelevant_and_indentation_is_allowed() {
        let text = "  C 1,2,3\nEA e\n\tNO n\nF 4, 5 ,6\nWE w\nSO s\n\n\n  1111\n  1N01\n  1111";
        let (config, body) = split_scene(text).unwrap();
        assert_eq!(config.floor, Rgb::new(4, 5, 6));
        assert_eq!(config.textures.west, PathBuf::from("w"));
        assert_eq!(body[0], "  1111");
    }

    #[test]
    fn duplicate_key_is_rejected_before_the_body() {
        let text = format!("F 1,1,1\n{HEADER}\n11\n");
        assert_eq!(split_scene(&text), Err(ParseError::DuplicateKey("F")));

        // Body is garbage; the duplicate still wins.
        let text = "NO a\nNO b\n1x?\n";
        assert_eq!(split_scene(text), Err(ParseError::DuplicateKey("NO")));
    }

    #[test]
    fn missing_and_unknown_keys() {
        let text = "NO a\nSO b\nWE c\nEA d\nF 1,2,3\n111\n";
        assert_eq!(split_scene(text), Err(ParseError::MissingKey("C")));

        let text = format!("R 1920 1080\n{HEADER}111\n");
        assert!(matches!(split_scene(&text), Err(ParseError::UnknownKey(_))));

        let text = format!("NOpath\n{HEADER}111\n");
        assert!(matches!(split_scene(&text), Err(ParseError::UnknownKey(_))));
    }

    #[test]
    fn colors_need_three_bytes() {
        for bad in ["1,2", "1,2,3,4", "256,0,0", "-1,0,0", "a,b,c", "1,,3"] {
            let text = HEADER.replace("F 220,100,0", &format!("F {bad}"));
            let text = format!("{text}111\n");
            assert!(
                matches!(split_scene(&text), Err(ParseError::InvalidColor { key: "F", .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn missing_map_body() {
        assert_eq!(split_scene(HEADER), Err(ParseError::MissingMap));
    }

    #[test]
    fn blank_line_inside_body_is_rejected_but_trailing_is_fine() {
        let ok = format!("{HEADER}\n\n111\n1N1\n111\n\n   \n\n");
        assert_eq!(split_scene(&ok).unwrap().1.len(), 3);

        let bad = format!("{HEADER}111\n1N1\n\n111\n");
        assert_eq!(split_scene(&bad), Err(ParseError::BlankLineInMap(9)));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let text = format!("{HEADER}111\n1N1\n111\n").replace('\n', "\r\n");
        let (_, body) = split_scene(&text).unwrap();
        assert_eq!(body, vec!["111", "1N1", "111"]);
    }
}
