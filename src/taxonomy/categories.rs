//! Built-in category table and alias table.
//!
//! Rows are declared in tie-break order. Phrases are lowercase.

use super::{CategoryKey, TaskCategory};

// ======================== Categories ========================

/// Canonical categories in declaration (tie-break) order.
pub static CATEGORIES: [TaskCategory; 6] = [
    TaskCategory {
        key: CategoryKey::Drilling,
        label: "Drilling / 穴あけ",
        synonyms: &[
            "drill",
            "drilling",
            "穴",
            "穴あけ",
            "下穴",
            "座ぐり",
            "カウンターボア",
            "ream",
            "reaming",
            "リーマ",
            "boring",
            "ボーリング",
            "tap",
            "tapping",
            "タップ",
            "タッピング",
            "ねじ立て",
        ],
        machines: &[
            "drill press",
            "ボール盤",
            "卓上ボール盤",
            "tapping center",
            "タッピングセンタ",
            "リーマ",
            "ボーリングヘッド",
        ],
    },
    TaskCategory {
        key: CategoryKey::Milling,
        label: "Milling / フライス",
        synonyms: &[
            "mill",
            "milling",
            "フライス",
            "エンドミル",
            "マシニング",
            "切削",
            "端面",
            "側面",
            "vmc",
            "hmc",
            "加工センタ",
            "マシニングセンタ",
            "ポケット",
            "溝削り",
        ],
        machines: &[
            "vmc",
            "立形マシニングセンタ",
            "hmc",
            "横形マシニングセンタ",
            "フライス盤",
            "汎用フライス",
        ],
    },
    TaskCategory {
        key: CategoryKey::Turning,
        label: "Turning / 旋削",
        synonyms: &[
            "turn",
            "turning",
            "lathe",
            "旋削",
            "旋盤",
            "突切り",
            "外径",
            "内径",
        ],
        machines: &["nc旋盤", "cnc lathe", "旋盤", "複合旋盤"],
    },
    TaskCategory {
        key: CategoryKey::Cutting,
        label: "Cutting / 切断",
        synonyms: &[
            "cut",
            "cutting",
            "切断",
            "レーザ",
            "レーザー",
            "plasma",
            "プラズマ",
            "waterjet",
            "ウォータージェット",
            "saw",
            "ノコ",
            "バンドソー",
            "せん断",
        ],
        machines: &[
            "レーザー加工機",
            "ファイバーレーザー",
            "co2レーザー",
            "ウォータージェット",
            "プラズマ切断機",
            "バンドソー",
            "丸ノコ",
            "シャーリング",
        ],
    },
    TaskCategory {
        key: CategoryKey::Finishing,
        label: "Finishing / 仕上げ",
        synonyms: &[
            "finish",
            "finishing",
            "研磨",
            "研削",
            "polish",
            "grind",
            "バフ",
            "deburr",
            "面取り",
            "バリ取り",
            "ラッピング",
            "ホーニング",
            "バレル",
        ],
        machines: &[
            "研削盤",
            "平面研削盤",
            "円筒研削盤",
            "バレル研磨機",
            "ブラスト",
            "ショットブラスト",
        ],
    },
    TaskCategory {
        key: CategoryKey::Inspection,
        label: "Inspection / 検査",
        synonyms: &[
            "inspection",
            "inspect",
            "検査",
            "測定",
            "計測",
            "寸法検査",
            "cmm",
            "三次元",
        ],
        machines: &[
            "三次元測定機",
            "cmm",
            "投影機",
            "マイクロメータ",
            "ハイトゲージ",
        ],
    },
];

/// Categories suggested when a step list has no classifiable step.
pub static FALLBACK_CATEGORIES: [CategoryKey; 4] = [
    CategoryKey::Drilling,
    CategoryKey::Milling,
    CategoryKey::Cutting,
    CategoryKey::Finishing,
];

// ======================== Aliases ========================

/// Exact-match aliases (lowercase) accepted for category names, including
/// the legacy tab names of older UIs.
pub static ALIASES: &[(&str, CategoryKey)] = &[
    ("drilling", CategoryKey::Drilling),
    ("穴あけ", CategoryKey::Drilling),
    ("穴", CategoryKey::Drilling),
    ("tap", CategoryKey::Drilling),
    ("tapping", CategoryKey::Drilling),
    ("タッピング", CategoryKey::Drilling),
    ("milling", CategoryKey::Milling),
    ("フライス", CategoryKey::Milling),
    ("マシニング", CategoryKey::Milling),
    ("vmc", CategoryKey::Milling),
    ("hmc", CategoryKey::Milling),
    ("cutting", CategoryKey::Cutting),
    ("切断", CategoryKey::Cutting),
    ("レーザー", CategoryKey::Cutting),
    ("waterjet", CategoryKey::Cutting),
    ("ウォータージェット", CategoryKey::Cutting),
    ("finishing", CategoryKey::Finishing),
    ("仕上げ", CategoryKey::Finishing),
    ("研磨", CategoryKey::Finishing),
    ("研削", CategoryKey::Finishing),
    ("turning", CategoryKey::Turning),
    ("旋削", CategoryKey::Turning),
    ("旋盤", CategoryKey::Turning),
    ("lathe", CategoryKey::Turning),
    ("inspection", CategoryKey::Inspection),
    ("検査", CategoryKey::Inspection),
    ("三次元", CategoryKey::Inspection),
    ("cmm", CategoryKey::Inspection),
];
