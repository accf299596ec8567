//! # HK Label Compliance
//!
//! Checklist validation for Hong Kong health-supplement labeling rules.
//! Purely textual: scans the template's text elements for the required
//! statements and scores the result. Advisory output only — it never
//! blocks rendering or export.

use serde::Serialize;

use crate::label::{LabelElement, LabelTemplate};

/// Outcome of a single checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    Pass,
    Warning,
    Fail,
}

/// One checklist entry.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceCheck {
    pub item: String,
    pub status: ComplianceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Full compliance report: 0-100 score, pass/fail verdict, itemized checks.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub passed: bool,
    pub score: u32,
    pub checklist: Vec<ComplianceCheck>,
}

/// A checklist rule: display name, severity when missing, match keywords.
struct Rule {
    item: &'static str,
    missing_status: ComplianceStatus,
    missing_message: &'static str,
    keywords: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        item: "淨含量",
        missing_status: ComplianceStatus::Fail,
        missing_message: "缺少淨含量標示",
        keywords: &["粒", "g", "ml", "淨含量"],
    },
    Rule {
        item: "使用方法",
        missing_status: ComplianceStatus::Warning,
        missing_message: "建議添加使用方法",
        keywords: &["用法", "每日", "服用"],
    },
    Rule {
        item: "注意事項",
        missing_status: ComplianceStatus::Warning,
        missing_message: "建議添加注意事項",
        keywords: &["注意", "警", "孕婦", "兒童"],
    },
    Rule {
        item: "存放方式",
        missing_status: ComplianceStatus::Warning,
        missing_message: "建議添加存放方式",
        keywords: &["存放", "儲存", "陰涼", "密封"],
    },
    Rule {
        item: "製造商資訊",
        missing_status: ComplianceStatus::Fail,
        missing_message: "缺少製造商或地址",
        keywords: &["製造", "地址", "香港"],
    },
    Rule {
        item: "香港製造標示",
        missing_status: ComplianceStatus::Fail,
        missing_message: "缺少「香港製造」標示",
        keywords: &["香港製造", "made in hong kong", "made in hk"],
    },
    Rule {
        item: "非藥物聲明",
        missing_status: ComplianceStatus::Fail,
        missing_message: "缺少非藥物聲明",
        keywords: &[
            "非藥物",
            "不能替代藥物",
            "not medicine",
            "not intended to diagnose",
        ],
    },
    Rule {
        item: "批次及有效期",
        missing_status: ComplianceStatus::Warning,
        missing_message: "建議添加批次號及有效期",
        keywords: &["批次", "有效期", "batch", "exp"],
    },
];

/// Validate a template against the HK supplement labeling checklist.
pub fn validate_hk(template: &LabelTemplate) -> ComplianceReport {
    let texts: Vec<String> = template
        .elements
        .iter()
        .filter_map(|el| match el {
            LabelElement::Text(t) => Some(t.text.to_lowercase()),
            _ => None,
        })
        .collect();

    let mut checklist = Vec::with_capacity(RULES.len() + 1);

    // Product name: any substantial text qualifies
    let has_product_name = texts.iter().any(|t| t.chars().count() > 2);
    checklist.push(ComplianceCheck {
        item: "產品名稱".to_string(),
        status: if has_product_name {
            ComplianceStatus::Pass
        } else {
            ComplianceStatus::Fail
        },
        message: (!has_product_name).then(|| "缺少產品名稱".to_string()),
    });

    for rule in RULES {
        let found = texts
            .iter()
            .any(|t| rule.keywords.iter().any(|kw| t.contains(kw)));
        checklist.push(ComplianceCheck {
            item: rule.item.to_string(),
            status: if found {
                ComplianceStatus::Pass
            } else {
                rule.missing_status
            },
            message: (!found).then(|| rule.missing_message.to_string()),
        });
    }

    let fail_count = checklist
        .iter()
        .filter(|c| c.status == ComplianceStatus::Fail)
        .count();
    let pass_count = checklist
        .iter()
        .filter(|c| c.status == ComplianceStatus::Pass)
        .count();
    let score = (pass_count as f64 / checklist.len() as f64 * 100.0).round() as u32;

    ComplianceReport {
        passed: fail_count == 0,
        score,
        checklist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_with_texts(texts: &[&str]) -> LabelTemplate {
        let elements: Vec<serde_json::Value> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                serde_json::json!({
                    "kind": "text", "id": format!("t{i}"), "x": 5, "y": 5 + i * 8,
                    "text": t, "font": {"sizePt": 8}
                })
            })
            .collect();
        serde_json::from_value(serde_json::json!({
            "size": {"widthMm": 140, "heightMm": 60},
            "elements": elements
        }))
        .unwrap()
    }

    #[test]
    fn test_complete_label_passes() {
        let report = validate_hk(&template_with_texts(&[
            "安眠寶 Sleep Well Plus",
            "淨含量：60粒",
            "用法：每日一粒，睡前服用",
            "注意事項：孕婦及兒童不宜",
            "存放於陰涼乾燥處",
            "香港製造 製造商：健康有限公司 香港九龍address",
            "本產品非藥物，不能替代藥物治療",
            "批次：A42 有效期至 2027-01",
        ]));
        assert!(report.passed);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_empty_template_fails() {
        let report = validate_hk(&template_with_texts(&[]));
        assert!(!report.passed);
        assert_eq!(report.score, 0);
        assert!(
            report
                .checklist
                .iter()
                .any(|c| c.status == ComplianceStatus::Fail)
        );
    }

    #[test]
    fn test_missing_recommended_is_warning_not_fail() {
        let report = validate_hk(&template_with_texts(&[
            "安眠寶",
            "淨含量：60粒",
            "香港製造 製造商：健康有限公司",
            "本產品非藥物",
        ]));
        // no fails, but warnings for usage/caution/storage/batch
        assert!(report.passed);
        assert!(
            report
                .checklist
                .iter()
                .any(|c| c.status == ComplianceStatus::Warning)
        );
        assert!(report.score < 100);
    }

    #[test]
    fn test_report_serializes_lowercase_status() {
        let report = validate_hk(&template_with_texts(&["安眠寶"]));
        let json = serde_json::to_value(&report).unwrap();
        let status = json["checklist"][0]["status"].as_str().unwrap();
        assert!(matches!(status, "pass" | "warning" | "fail"));
    }
}
