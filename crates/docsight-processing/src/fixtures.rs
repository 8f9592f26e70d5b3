//! Builders for small, valid PDFs with known text content.

/// Single-page PDF whose only content is `text` set in Helvetica.
pub fn create_text_pdf(text: &str) -> Vec<u8> {
    create_pdf(&[text])
}

/// PDF with one page per entry. An empty entry produces a page with no text.
pub fn create_pdf(pages: &[&str]) -> Vec<u8> {
    let font_id = 3;
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + i * 2).collect();

    let kids = page_ids
        .iter()
        .map(|id| format!("{} 0 R", id))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    ];

    for (page_id, text) in page_ids.iter().zip(pages) {
        let content = if text.is_empty() {
            String::new()
        } else {
            format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", escape(text))
        };

        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
                font_id,
                page_id + 1
            )
            .into_bytes(),
        );
        objects.push(
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            )
            .into_bytes(),
        );
    }

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());

    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        pdf.extend_from_slice(body);
        pdf.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    pdf
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xref_points_at_objects() {
        let pdf = create_pdf(&["one", "two"]);
        let text = String::from_utf8_lossy(&pdf);

        let startxref: usize = text
            .split("startxref\n")
            .nth(1)
            .and_then(|s| s.lines().next())
            .and_then(|s| s.parse().ok())
            .unwrap();
        assert!(text[startxref..].starts_with("xref"));

        // Object 4 is the first page
        let entry = text[startxref..].lines().nth(6).unwrap();
        let offset: usize = entry[..10].parse().unwrap();
        assert!(text[offset..].starts_with("4 0 obj"));
    }

    #[test]
    fn test_text_is_escaped() {
        let pdf = create_text_pdf("C++ (systems)");
        assert!(String::from_utf8_lossy(&pdf).contains("C++ \\(systems\\)"));
    }
}
