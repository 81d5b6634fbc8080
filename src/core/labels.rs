//! Every piece of text that appears on the diagram, per language.
//!
//! The Chinese catalogue carries the annotations the chart was first drawn
//! with; the English one is a straight translation.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Zh,
    En,
}

impl Lang {
    pub const ALL: &[Lang] = &[Lang::Zh, Lang::En];

    pub fn code(self) -> &'static str {
        match self {
            Lang::Zh => "zh",
            Lang::En => "en",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lang::Zh => "中文",
            Lang::En => "English",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn catalogue(self) -> &'static Catalogue {
        match self {
            Lang::Zh => &ZH,
            Lang::En => &EN,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "cn" | "chinese" => Ok(Lang::Zh),
            "en" | "english" => Ok(Lang::En),
            other => Err(ConfigError::UnknownLanguage(other.to_string())),
        }
    }
}

/// Diagram text for one language.
#[derive(Debug)]
pub struct Catalogue {
    /// Prefix of the proton line, e.g. `"质子 p"`.
    pub protons: &'static str,
    pub neutrons: &'static str,
    /// Labels above the four nucleus stages, left to right.
    pub stage_labels: [&'static str; 4],
    pub fission_title: &'static str,
    pub fragment_a: &'static str,
    pub fragment_b: &'static str,
    pub free_neutrons: &'static str,
    /// Captions of the four stage arrows, left to right.
    pub arrow_captions: [&'static str; 4],
    pub footer: &'static str,
}

impl Catalogue {
    pub fn proton_line(&self, protons: u32) -> String {
        format!("{} = {protons}", self.protons)
    }

    pub fn neutron_line(&self, neutrons: u32) -> String {
        format!("{} = {neutrons}", self.neutrons)
    }
}

static ZH: Catalogue = Catalogue {
    protons: "质子 p",
    neutrons: "中子 n",
    stage_labels: [
        "铀-238 (U-238)",
        "铀-239 (U-239)\n（俘获中子，激发状态）",
        "镎-239 (Np-239)\n（β⁻ 衰变）",
        "钚-239 (Pu-239)\n（第二次 β⁻ 衰变）",
    ],
    fission_title: "裂变示意",
    fragment_a: "裂变产物A\n(≈中子/质子比不同)",
    fragment_b: "裂变产物B\n(≈中子/质子比不同)",
    free_neutrons: "游离中子\n（可继续俘获或引发裂变）",
    arrow_captions: [
        "俘获中子\n(+1 中子)",
        "β⁻ 衰变\n(中子→质子 + 电子 + 反中微子)",
        "再次 β⁻ 衰变\n(中子→质子 + 电子 + 反中微子)",
        "用于裂变或做燃料\n(吸收快中子并裂变释放能量)",
    ],
    footer: "流程要点：\n\
             1) 铀-238 经中子俘获变为铀-239（不稳定）。\n\
             2) 铀-239 通过两次 β⁻ 衰变 → 镎-239 → 钚-239。\n\
             3) 钚-239 可发生裂变，释放能量和多个中子，这些中子可继续被 U-238 俘获或引发更多裂变（链式反应）。\n\
             注：图中 n 表示中子数，p 表示质子数。",
};

static EN: Catalogue = Catalogue {
    protons: "protons p",
    neutrons: "neutrons n",
    stage_labels: [
        "Uranium-238 (U-238)",
        "Uranium-239 (U-239)\n(neutron captured, excited)",
        "Neptunium-239 (Np-239)\n(β⁻ decay)",
        "Plutonium-239 (Pu-239)\n(second β⁻ decay)",
    ],
    fission_title: "Fission",
    fragment_a: "Fragment A\n(≈ different n/p ratio)",
    fragment_b: "Fragment B\n(≈ different n/p ratio)",
    free_neutrons: "Free neutrons\n(may be captured or cause fission)",
    arrow_captions: [
        "Neutron capture\n(+1 neutron)",
        "β⁻ decay\n(n → p + e⁻ + antineutrino)",
        "Second β⁻ decay\n(n → p + e⁻ + antineutrino)",
        "Used as fissile fuel\n(absorbs a neutron, splits, releases energy)",
    ],
    footer: "Key points:\n\
             1) U-238 captures a neutron and becomes U-239 (unstable).\n\
             2) U-239 undergoes two β⁻ decays → Np-239 → Pu-239.\n\
             3) Pu-239 can fission, releasing energy and several neutrons that may be captured by U-238 or trigger more fissions (chain reaction).\n\
             Note: n is the neutron count, p the proton count.",
};

/// Replace superscript and Unicode minus signs with ASCII `-`, for terminals
/// whose font lacks them.
pub fn ascii_minus(text: &str) -> String {
    text.replace(['⁻', '−'], "-")
}
