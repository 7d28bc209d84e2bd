//! Localized names and taglines for the 16 base type codes.

use super::types::Lang;
use serde::{Deserialize, Serialize};

/// Profile text for one base code in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeProfile {
    pub name: String,
    pub tagline: String,
}

struct ProfileEntry {
    code: &'static str,
    name_ko: &'static str,
    name_en: &'static str,
    tagline_ko: &'static str,
    tagline_en: &'static str,
}

const PROFILES: [ProfileEntry; 16] = [
    ProfileEntry {
        code: "LDUF",
        name_ko: "보존자형 미식가",
        name_en: "The Preserver",
        tagline_ko: "익숙하고 깊은 맛을 안정적으로 즐긴다. 한 번 마음에 든 메뉴를 꾸준히 찾는 편이다.",
        tagline_en: "Enjoys familiar, deep flavors consistently. Once a favorite is found, they stick with it.",
    },
    ProfileEntry {
        code: "LDUP",
        name_ko: "연구자형 미식가",
        name_en: "The Researcher",
        tagline_ko: "은은한 깊이의 차이를 탐구한다. 전통적인 맛 속에서도 새로운 발견을 즐긴다.",
        tagline_en: "Explores subtle depth differences. Finds new discoveries within traditional flavors.",
    },
    ProfileEntry {
        code: "LDSF",
        name_ko: "감상자형 미식가",
        name_en: "The Appreciator",
        tagline_ko: "묵직하고 달콤한 맛을 여유롭게 음미한다. 음식에서 위안을 찾는 타입이다.",
        tagline_en: "Savors rich and sweet flavors leisurely. Finds comfort in food.",
    },
    ProfileEntry {
        code: "LDSP",
        name_ko: "조합자형 미식가",
        name_en: "The Composer",
        tagline_ko: "깊은 풍미와 달콤함을 새롭게 조합한다. 익숙한 재료에서 창의적인 맛을 만들어낸다.",
        tagline_en: "Composes new combinations of deep flavors and sweetness. Creates creative tastes from familiar ingredients.",
    },
    ProfileEntry {
        code: "LAUF",
        name_ko: "절제자형 미식가",
        name_en: "The Minimalist",
        tagline_ko: "산뜻하고 정돈된 감칠을 선호한다. 과하지 않은 균형을 중요하게 여긴다.",
        tagline_en: "Prefers crisp, refined umami. Values balance without excess.",
    },
    ProfileEntry {
        code: "LAUP",
        name_ko: "탐색자형 미식가",
        name_en: "The Explorer",
        tagline_ko: "가볍고 산뜻한 메뉴를 중심으로 새로운 맛을 시도한다.",
        tagline_en: "Tries new flavors centered on light, fresh dishes.",
    },
    ProfileEntry {
        code: "LASF",
        name_ko: "감각자형 미식가",
        name_en: "The Sensualist",
        tagline_ko: "상큼하고 달콤한 조합을 즐긴다. 밝고 경쾌한 취향을 가졌다.",
        tagline_en: "Enjoys fresh and sweet combinations. Has a bright, cheerful palate.",
    },
    ProfileEntry {
        code: "LASP",
        name_ko: "창안자형 미식가",
        name_en: "The Innovator",
        tagline_ko: "산미와 단맛의 새로운 조합에 관심이 많다. 트렌드를 빠르게 받아들인다.",
        tagline_en: "Interested in new acid-sweet combinations. Quick to adopt trends.",
    },
    ProfileEntry {
        code: "HDUF",
        name_ko: "장인형 미식가",
        name_en: "The Artisan",
        tagline_ko: "강하고 묵직한 맛을 선호한다. 취향이 분명하고 흔들림이 적다.",
        tagline_en: "Prefers strong, heavy flavors. Has clear, unwavering tastes.",
    },
    ProfileEntry {
        code: "HDUP",
        name_ko: "추적자형 미식가",
        name_en: "The Pursuer",
        tagline_ko: "더 진하고 강한 맛을 찾아다닌다. 깊은 맛에 대한 집요함이 있다.",
        tagline_en: "Seeks richer, stronger flavors. Persistent about deep tastes.",
    },
    ProfileEntry {
        code: "HDSF",
        name_ko: "집중자형 미식가",
        name_en: "The Concentrator",
        tagline_ko: "강렬한 단맛과 묵직함에 몰입한다. 확실한 쾌감을 추구한다.",
        tagline_en: "Immerses in intense sweetness and richness. Seeks definite pleasure.",
    },
    ProfileEntry {
        code: "HDSP",
        name_ko: "도전자형 미식가",
        name_en: "The Challenger",
        tagline_ko: "자극적이고 달콤한 조합을 과감히 시도한다. 강한 맛의 한계를 넓혀간다.",
        tagline_en: "Boldly tries stimulating sweet combinations. Pushes the boundaries of bold flavors.",
    },
    ProfileEntry {
        code: "HAUF",
        name_ko: "정밀자형 미식가",
        name_en: "The Precisionist",
        tagline_ko: "매콤하고 산뜻한 자극을 또렷하게 즐긴다. 취향의 기준이 명확하다.",
        tagline_en: "Clearly enjoys spicy, fresh stimulation. Has precise taste standards.",
    },
    ProfileEntry {
        code: "HAUP",
        name_ko: "개척자형 미식가",
        name_en: "The Pioneer",
        tagline_ko: "날카롭고 강한 맛을 적극적으로 탐험한다. 새로운 메뉴에 개방적이다.",
        tagline_en: "Actively explores sharp, strong flavors. Open to new dishes.",
    },
    ProfileEntry {
        code: "HASF",
        name_ko: "조율자형 미식가",
        name_en: "The Harmonizer",
        tagline_ko: "매콤달콤한 균형을 안정적으로 즐긴다. 강하지만 조화로운 맛을 선호한다.",
        tagline_en: "Steadily enjoys spicy-sweet balance. Prefers strong but harmonious flavors.",
    },
    ProfileEntry {
        code: "HASP",
        name_ko: "선도자형 미식가",
        name_en: "The Trendsetter",
        tagline_ko: "강렬하고 생동감 있는 맛을 앞서 경험한다. 새로운 조합을 이끄는 타입이다.",
        tagline_en: "Experiences vibrant, intense flavors first. Leads in new combinations.",
    },
];

/// Look up the localized profile for a 4-letter base code.
///
/// Returns `None` for unknown codes rather than an error; callers must
/// branch on the absence.
pub fn taste_type_profile(base_code: &str, lang: Lang) -> Option<TypeProfile> {
    PROFILES
        .iter()
        .find(|entry| entry.code == base_code)
        .map(|entry| match lang {
            Lang::Ko => TypeProfile {
                name: entry.name_ko.to_string(),
                tagline: entry.tagline_ko.to_string(),
            },
            Lang::En => TypeProfile {
                name: entry.name_en.to_string(),
                tagline: entry.tagline_en.to_string(),
            },
        })
}
