//! Heuristic topic classification for cloud announcements.
//!
//! Announcements are tagged with one of seven topic categories by matching
//! keywords against the title and summary. The rule list is **ordered**: the
//! first rule with any matching keyword wins, so a text mentioning both AI
//! and compute terms is tagged AI. Keywords cover English and Japanese since
//! the Azure and AWS feeds are consumed through their Japanese editions.
//!
//! The rule table is plain data handed to the classifier, so reordering or
//! extending it never touches control flow.

use serde::{Deserialize, Serialize};

/// Topic category for one announcement.
///
/// Serialized as the dashboard's tag strings (`ai-tag`, `security-tag`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "ai-tag")]
    Ai,
    #[serde(rename = "security-tag")]
    Security,
    #[serde(rename = "container-tag")]
    Container,
    #[serde(rename = "database-tag")]
    Database,
    #[serde(rename = "storage-tag")]
    Storage,
    #[serde(rename = "network-tag")]
    Network,
    #[serde(rename = "compute-tag")]
    Compute,
}

impl Category {
    /// Display label shown next to the tag on the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            Category::Ai => "AI / ML",
            Category::Security => "セキュリティ",
            Category::Container => "コンテナ",
            Category::Database => "データベース",
            Category::Storage => "ストレージ",
            Category::Network => "ネットワーク",
            Category::Compute => "コンピューティング",
        }
    }
}

/// One ordered classification rule: a category and its trigger keywords.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

/// The built-in rule list, highest priority first.
///
/// Keywords are matched as literal lowercase substrings.
pub static DEFAULT_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Ai,
        keywords: &[
            "ai", "ml", "machine learning", "generative", "llm", "bedrock", "sagemaker",
            "vertex", "foundry", "openai", "gemini", "gpt", "phi", "llama", "diffusion",
            "inference", "training", "neural",
            "人工知能", "生成ai", "機械学習", "推論", "学習モデル", "エージェント",
            "チャット", "言語モデル", "ベクター検索", "ファインチューニング",
        ],
    },
    CategoryRule {
        category: Category::Security,
        keywords: &[
            "security", "iam", "identity", "auth", "mfa", "zero trust", "compliance",
            "encryption", "kms", "vault", "sentinel", "defender", "guard", "waf",
            "shield", "entra",
            "セキュリティ", "認証", "暗号化", "ゼロトラスト", "アイデンティティ",
            "コンプライアンス", "権限管理", "不正アクセス", "脆弱性", "脅威検出",
        ],
    },
    CategoryRule {
        category: Category::Container,
        keywords: &[
            "kubernetes", "container", "eks", "aks", "gke", "oke", "docker", "helm",
            "fargate", "cloud run", "app service",
            "コンテナ", "クバネティス", "コンテナイメージ", "マイクロサービス",
        ],
    },
    CategoryRule {
        category: Category::Database,
        keywords: &[
            "database", "db", "rds", "aurora", "dynamo", "cosmos", "spanner", "alloydb",
            "sql", "postgres", "mysql", "redis", "mongodb", "autonomous", "heatwave",
            "bigtable", "firestore",
            "データベース", "データウェアハウス", "データ分析", "ベクターデータベース",
            "ビッグクエリ", "ストリーミング分析",
        ],
    },
    CategoryRule {
        category: Category::Storage,
        keywords: &[
            "storage", "s3", "blob", "bucket", "gcs", "object storage", "efs", "fsx",
            "archive", "backup",
            "ストレージ", "バックアップ", "アーカイブ", "オブジェクトストレージ",
            "ファイルストレージ", "ブロックストレージ",
        ],
    },
    CategoryRule {
        category: Category::Network,
        keywords: &[
            "network", "vpc", "vnet", "subnet", "cdn", "cloudfront", "load balancer",
            "dns", "route", "direct connect", "expressroute", "vpn", "firewall",
            "ネットワーク", "ファイアウォール", "ロードバランサー", "コンテンツ配信",
            "専用線", "vpn接続", "サブネット",
        ],
    },
    CategoryRule {
        category: Category::Compute,
        keywords: &[
            "compute", "ec2", "vm", "virtual machine", "instance", "graviton", "cobalt",
            "axion", "ampere", "gpu", "tpu", "lambda", "functions", "serverless", "batch",
            "仮想マシン", "コンピューティング", "サーバーレス", "バッチ処理",
            "高性能コンピューティング", "hpc", "インスタンス", "gpuクラスター",
        ],
    },
];

/// Classify an announcement by first-match-wins over the ordered rule list.
///
/// Title and summary are concatenated and lowercased before matching. With no
/// matching rule the announcement defaults to [`Category::Compute`].
pub fn classify(rules: &[CategoryRule], title: &str, summary: &str) -> Category {
    let text = format!("{} {}", title, summary).to_lowercase();
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| text.contains(kw)))
        .map(|rule| rule.category)
        .unwrap_or(Category::Compute)
}
