//! Producer name, address and contact details.

use super::patterns::{ADDRESS_LABEL, CONTACT_PATTERNS, PRODUCER_PATTERNS};
use super::{char_len, first_capture, LineCorpus};

const ADDRESS_MIN_CHARS: usize = 10;

/// Extract the producer name.
///
/// Labeled forms are tried in keyword priority order (生产商 before
/// 生产厂家 and so on); the value ends at a newline, 地址 or 电话. Without a
/// label, the first short line naming a company (有限公司) is used.
pub fn extract_producer(corpus: &LineCorpus) -> Option<String> {
    if let Some(producer) = first_capture(&PRODUCER_PATTERNS, corpus.full_text()) {
        return Some(producer);
    }

    corpus
        .lines()
        .iter()
        .find(|line| line.contains("有限公司") && !line.contains("地址") && char_len(line) < 50)
        .map(|line| line.trim().to_string())
}

/// Extract the producer address.
///
/// Only the single following line is considered as a continuation.
pub fn extract_address(corpus: &LineCorpus) -> Option<String> {
    let lines = corpus.lines();

    for (idx, line) in lines.iter().enumerate() {
        if !line.contains("地址") {
            continue;
        }
        let Some(caps) = ADDRESS_LABEL.captures(line) else {
            continue;
        };

        let mut address = caps[1].trim().to_string();
        if char_len(&address) < ADDRESS_MIN_CHARS {
            if let Some(next) = lines.get(idx + 1) {
                address.push(' ');
                address.push_str(next.trim());
            }
        }
        return Some(address);
    }

    None
}

/// Extract a phone number or contact line.
pub fn extract_contact_info(corpus: &LineCorpus) -> Option<String> {
    first_capture(&CONTACT_PATTERNS, corpus.full_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_producer_stops_at_address() {
        let corpus = LineCorpus::from_texts(["生产商：XX调味品有限公司 地址：XX市XX路1号"]);
        assert_eq!(extract_producer(&corpus), Some("XX调味品有限公司".to_string()));
    }

    #[test]
    fn test_producer_keyword_priority() {
        let corpus = LineCorpus::from_texts([
            "委托生产企业：甲食品有限公司",
            "生产商：乙食品有限公司",
        ]);
        assert_eq!(extract_producer(&corpus), Some("乙食品有限公司".to_string()));
    }

    #[test]
    fn test_producer_at_end_of_text() {
        let corpus = LineCorpus::from_texts(["制造商：丙食品有限公司"]);
        assert_eq!(extract_producer(&corpus), Some("丙食品有限公司".to_string()));
    }

    #[test]
    fn test_producer_company_line_fallback() {
        let corpus = LineCorpus::from_texts([
            "地址：XX烘焙食品有限公司三号厂房",
            "XX烘焙食品有限公司",
        ]);
        assert_eq!(extract_producer(&corpus), Some("XX烘焙食品有限公司".to_string()));
    }

    #[test]
    fn test_address_short_value_takes_next_line() {
        let corpus = LineCorpus::from_texts(["地址：XX市XX区", "烘焙产业园3号楼", "电话：010-34567890"]);
        assert_eq!(extract_address(&corpus), Some("XX市XX区 烘焙产业园3号楼".to_string()));
    }

    #[test]
    fn test_address_long_value_stands_alone() {
        let corpus = LineCorpus::from_texts(["地址：XX市XX区XX街道XX路烘焙产业园3号楼", "电话：010-34567890"]);
        assert_eq!(
            extract_address(&corpus),
            Some("XX市XX区XX街道XX路烘焙产业园3号楼".to_string())
        );
    }

    #[test]
    fn test_contact_info() {
        let phone = LineCorpus::from_texts(["电话：010-34567890"]);
        let contact = LineCorpus::from_texts(["联系方式：400-800-8888（工作日）"]);

        assert_eq!(extract_contact_info(&phone), Some("010-34567890".to_string()));
        assert_eq!(extract_contact_info(&contact), Some("400-800-8888（工作日）".to_string()));
        assert_eq!(extract_contact_info(&LineCorpus::from_texts(["无"])), None);
    }
}
