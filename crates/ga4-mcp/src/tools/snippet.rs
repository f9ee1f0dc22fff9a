//! gtag.js installation snippet.

/// HTML to paste into every page's `<head>` for a web stream.
///
/// The measurement ID is interpolated as given; no validation or network.
pub fn tracking_snippet(measurement_id: &str) -> String {
    format!(
        r#"<!-- Google Analytics 4 -->
<script async src="https://www.googletagmanager.com/gtag/js?id={measurement_id}"></script>
<script>
  window.dataLayer = window.dataLayer || [];
  function gtag(){{dataLayer.push(arguments);}}
  gtag('js', new Date());
  gtag('config', '{measurement_id}');
</script>
<!-- End Google Analytics 4 -->"#
    )
}
