//! Russian marker lexicon
//!
//! Phrases are written in normalized form: lowercase, `е` instead of `ё`,
//! hyphens as spaces.

use super::{LanguageData, StaticRule};
use crate::MarkerCategory::*;

pub(crate) static RUSSIAN: LanguageData = LanguageData {
    code: "ru",
    aliases: &["rus", "russian", "русский"],
    version: "1.2.0",
    rules: RULES,
    evidence_terms: &[
        "клиническ* исследовани*",
        "клиническ* испытани*",
        "рандомизированн* контролируем*",
        "рандомизированн* исследовани*",
        "доказательн* медицин*",
        "плацебо контрол*",
        "мета анализ*",
        "метаанализ*",
        "систематическ* обзор*",
        "рецензируем* журнал*",
        "peer review*",
    ],
    amplifiers: &[
        "абсолютно",
        "полностью",
        "совершенно",
        "исключительно",
        "невероятно",
        "поразительно",
        "удивительно",
        "феноменально",
    ],
};

static RULES: &[StaticRule] = &[
    // Miracle claims
    StaticRule {
        id: "ru-miracle-remedy",
        category: MiracleCure,
        patterns: &[
            "чудо средств*",
            "чудосредств*",
            "чудо препарат*",
            "чудо таблетк*",
            "чудо лекарств*",
        ],
        weight: 1.5,
    },
    StaticRule {
        id: "ru-miracle-miraculous",
        category: MiracleCure,
        patterns: &["чудодейственн*", "чудесн* исцелени*", "чудесн* излечени*"],
        weight: 1.2,
    },
    StaticRule {
        id: "ru-miracle-magic",
        category: MiracleCure,
        patterns: &[
            "волшебн* эффект*",
            "волшебн* средств*",
            "волшебн* таблетк*",
            "магическ* формул*",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "ru-miracle-revolutionary",
        category: MiracleCure,
        patterns: &[
            "революционн* прорыв*",
            "революционн* средств*",
            "революционн* метод*",
            "революционн* препарат*",
            "революционн* чудо*",
            "революционн* открыти*",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "ru-miracle-sensation",
        category: MiracleCure,
        patterns: &["сенсационн* открыти*", "уникальн* формул*"],
        weight: 0.8,
    },
    // Universal remedies
    StaticRule {
        id: "ru-universal-all-diseases",
        category: UniversalRemedy,
        patterns: &[
            "от всех болезней",
            "от любых болезней",
            "от всех болячек",
            "лечит все",
            "лечит любые",
            "помогает при любых",
        ],
        weight: 1.5,
    },
    StaticRule {
        id: "ru-universal-panacea",
        category: UniversalRemedy,
        patterns: &["панаце*", "универсальн* средств*", "универсальн* лекарств*"],
        weight: 1.2,
    },
    StaticRule {
        id: "ru-universal-hundred-diseases",
        category: UniversalRemedy,
        patterns: &[r"re:\bот \d+ (болезней|заболеваний|недугов)\b"],
        weight: 1.2,
    },
    // Absolute guarantees
    StaticRule {
        id: "ru-certainty-guarantee",
        category: AbsoluteCertainty,
        patterns: &[
            "100% гаранти*",
            "абсолютн* гаранти*",
            "гарантирован* результат*",
            "гарантирован* излечени*",
            "гарантирован* эффект*",
        ],
        weight: 1.5,
    },
    StaticRule {
        id: "ru-certainty-complete-cure",
        category: AbsoluteCertainty,
        patterns: &[
            "полн* излечени*",
            "полност* излечива*",
            "полност* вылечива*",
            "полност* исцел*",
            "навсегда избав*",
            "излечива* навсегда",
        ],
        weight: 1.2,
    },
    StaticRule {
        id: "ru-certainty-totally-safe",
        category: AbsoluteCertainty,
        patterns: &[
            "без побочных эффектов",
            "абсолютно безопасн*",
            "100% безопасн*",
            "100% эффективн*",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "ru-certainty-works-for-everyone",
        category: AbsoluteCertainty,
        patterns: &["помогает всем", "помогает в 100%", "действует на всех"],
        weight: 1.0,
    },
    // Suppressed truth
    StaticRule {
        id: "ru-suppressed-doctors-hide",
        category: SuppressedTruth,
        patterns: &[
            r"re:\b(врачи|медики|доктора|фармацевты) (скрыва|умалчива|замалчива)\w*",
            "скрывается врачами",
            "скрывают от нас",
            "скрывают от вас",
        ],
        weight: 1.5,
    },
    StaticRule {
        id: "ru-suppressed-information",
        category: SuppressedTruth,
        patterns: &[
            "скрыва* эту информаци*",
            "скрыва* правд*",
            "замалчива* правд*",
            "запрещенн* информаци*",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "ru-suppressed-pharma",
        category: SuppressedTruth,
        patterns: &[
            "тайн* фармацевт*",
            "заговор* фармацевт*",
            "фармацевтическ* мафи*",
            "фармамафи*",
        ],
        weight: 1.2,
    },
    StaticRule {
        id: "ru-suppressed-official-medicine",
        category: SuppressedTruth,
        patterns: &[
            "не признается официальной медициной",
            "официальная медицина молчит",
            "официальная медицина скрывает",
            "не хотят чтобы вы знали",
        ],
        weight: 1.2,
    },
    StaticRule {
        id: "ru-suppressed-secret-knowledge",
        category: SuppressedTruth,
        patterns: &[
            "секретн* методик*",
            "секретн* рецепт*",
            "древн* знани*",
            "древн* рецепт*",
            "тайн* знани*",
            "тибетск* медицин*",
        ],
        weight: 0.8,
    },
    // Pseudo-scientific jargon
    StaticRule {
        id: "ru-jargon-energy",
        category: PseudoJargon,
        patterns: &[
            "энергетическ* пол*",
            "энергетическ* баланс*",
            "биоэнергетик*",
            "биопол*",
            "квантов* энерги*",
            "космическ* энерги*",
            "энергоинформационн*",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "ru-jargon-quantum",
        category: PseudoJargon,
        patterns: &[
            "квантов* исцелени*",
            "квантов* лечени*",
            "квантов* медицин*",
            "вибрационн* терапи*",
            "торсионн* пол*",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "ru-jargon-detox",
        category: PseudoJargon,
        patterns: &[
            "детокс*",
            "очищени* организма",
            "чистк* организма",
            "вывод* токсинов",
            "выведени* токсинов",
            "очистк* от токсинов",
        ],
        weight: 0.8,
    },
    StaticRule {
        id: "ru-jargon-slags",
        category: PseudoJargon,
        patterns: &["шлак*"],
        weight: 0.8,
    },
    StaticRule {
        id: "ru-jargon-water",
        category: PseudoJargon,
        patterns: &["структурированн* вод*", "заряженн* вод*", "памят* вод*"],
        weight: 1.0,
    },
    // Natural as a guarantee
    StaticRule {
        id: "ru-natural-hundred-percent",
        category: NaturalFallacy,
        patterns: &[
            "100% натуральн*",
            "исключительно натуральн*",
            "только природн* компонент*",
            "только натуральн* компонент*",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "ru-natural-chemistry-free",
        category: NaturalFallacy,
        patterns: &["без химии", "никакой химии", "экологически чист*"],
        weight: 0.8,
    },
    // Urgency and pressure
    StaticRule {
        id: "ru-urgency-fast-results",
        category: UrgencyPressure,
        patterns: &[
            r"re:\bза \d+ (дн|недел|час)\w*",
            r"re:\bв считанные \w+",
            "мгновенн* результат*",
            "немедленн* эффект*",
            "быстр* излечени*",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "ru-urgency-last-chance",
        category: UrgencyPressure,
        patterns: &[
            "не упустите шанс",
            "последн* надежд*",
            "последн* шанс*",
            "успейте купить",
            "успейте заказать",
            "только сегодня",
            "количество ограничено",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "ru-urgency-fear",
        category: UrgencyPressure,
        patterns: &[
            "спасет вашу жизнь",
            "единственн* способ*",
            "врачи в шоке",
            "медики в шоке",
        ],
        weight: 1.0,
    },
    // Mass testimonials
    StaticRule {
        id: "ru-anecdotal-mass",
        category: Anecdotal,
        patterns: &[
            "тысячи довольных",
            "миллионы людей",
            "все пациенты довольны",
            "никто не пожалел",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "ru-anecdotal-reviews",
        category: Anecdotal,
        patterns: &[
            "отзывы потрясающие",
            "реальные отзывы",
            "проверено на себе",
            "испытал* на себе",
            "мне помогло",
        ],
        weight: 0.8,
    },
];
