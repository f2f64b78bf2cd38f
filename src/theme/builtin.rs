use super::{Color, Effect, FaceFeatures, FontSpec, FontWeight, HandWidths, Palette, Theme};

/// Name of the theme used when the configuration names none that exists.
pub const DEFAULT_THEME: &str = "Modern";

/// The themes every catalog starts with, in display order.
pub fn builtin_themes() -> Vec<Theme> {
    vec![modern(), classic(), dark(), light(), neon(), minimal()]
}

fn modern() -> Theme {
    Theme::new(
        DEFAULT_THEME,
        Palette {
            background: Color::hex(0x2c3e50),
            canvas: Color::hex(0x34495e),
            face: Color::hex(0xecf0f1),
            hour_hand: Color::hex(0xe74c3c),
            minute_hand: Color::hex(0xf39c12),
            second_hand: Color::hex(0xe67e22),
            numerals: Color::hex(0x2c3e50),
            marks: Color::hex(0x7f8c8d),
            hub: Color::hex(0xc0392b),
            digital_text: Color::hex(0xecf0f1),
            outline: Color::hex(0xbdc3c7),
        },
    )
}

fn classic() -> Theme {
    Theme::new(
        "Classic",
        Palette {
            background: Color::hex(0xf4f1de),
            canvas: Color::hex(0xf4f1de),
            face: Color::hex(0xfefefe),
            hour_hand: Color::hex(0x2d3436),
            minute_hand: Color::hex(0x2d3436),
            second_hand: Color::hex(0xd63031),
            numerals: Color::hex(0x2d3436),
            marks: Color::hex(0x636e72),
            hub: Color::hex(0x2d3436),
            digital_text: Color::hex(0x2d3436),
            outline: Color::hex(0xdddddd),
        },
    )
    .with_hands(HandWidths::new(8, 6, 2))
}

fn dark() -> Theme {
    Theme::new(
        "Dark",
        Palette {
            background: Color::hex(0x0d1117),
            canvas: Color::hex(0x161b22),
            face: Color::hex(0x21262d),
            hour_hand: Color::hex(0x58a6ff),
            minute_hand: Color::hex(0x79c0ff),
            second_hand: Color::hex(0xf85149),
            numerals: Color::hex(0xc9d1d9),
            marks: Color::hex(0x484f58),
            hub: Color::hex(0xf85149),
            digital_text: Color::hex(0xc9d1d9),
            outline: Color::hex(0x30363d),
        },
    )
}

fn light() -> Theme {
    Theme::new(
        "Light",
        Palette {
            background: Color::hex(0xffffff),
            canvas: Color::hex(0xf8f9fa),
            face: Color::hex(0xffffff),
            hour_hand: Color::hex(0x495057),
            minute_hand: Color::hex(0x6c757d),
            second_hand: Color::hex(0xdc3545),
            numerals: Color::hex(0x212529),
            marks: Color::hex(0xadb5bd),
            hub: Color::hex(0xdc3545),
            digital_text: Color::hex(0x212529),
            outline: Color::hex(0xdee2e6),
        },
    )
}

fn neon() -> Theme {
    Theme::new(
        "Neon",
        Palette {
            background: Color::hex(0x0a0a0a),
            canvas: Color::hex(0x1a1a1a),
            face: Color::hex(0x000000),
            hour_hand: Color::hex(0x00ff41),
            minute_hand: Color::hex(0xff0080),
            second_hand: Color::hex(0x00d4ff),
            numerals: Color::hex(0xffffff),
            marks: Color::hex(0x666666),
            hub: Color::hex(0xff0080),
            digital_text: Color::hex(0x00ff41),
            outline: Color::hex(0x333333),
        },
    )
    .with_effect(Effect::Glow)
    .with_features(FaceFeatures::MINUTE_TICKS | FaceFeatures::GLOW_RING)
}

fn minimal() -> Theme {
    Theme::new(
        "Minimal",
        Palette {
            background: Color::hex(0xfafafa),
            canvas: Color::hex(0xfafafa),
            face: Color::hex(0xffffff),
            hour_hand: Color::hex(0x424242),
            minute_hand: Color::hex(0x757575),
            second_hand: Color::hex(0xff5722),
            numerals: Color::hex(0x212121),
            marks: Color::hex(0xbdbdbd),
            hub: Color::hex(0xff5722),
            digital_text: Color::hex(0x212121),
            outline: Color::hex(0xe0e0e0),
        },
    )
    .with_font(FontSpec {
        family: "Arial".to_string(),
        size: 18,
        weight: FontWeight::Normal,
    })
    .with_hands(HandWidths::new(4, 2, 1))
    .with_features(FaceFeatures::SLIM_MARKS)
}
