//! Static stylesheet and script assets shipped with HTML exports.

use std::fmt::Write;

use site_core::Page;

/// Resets and component classes.
pub const BASE_CSS: &str = "\
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif; line-height: 1.6; background: #f5f5f5; }
img, video { display: block; max-width: 100%; }
.page-section { position: relative; width: 100%; margin: 0 auto; background: white; overflow: hidden; }
.page-section.fluid { container-type: inline-size; }
.page-canvas { position: relative; width: 100%; }
.text-component { white-space: pre-wrap; overflow-wrap: break-word; }
.button-component { cursor: pointer; border: none; font: inherit; }
.button-component:hover { opacity: 0.8; }
.image-component, .video-component { object-fit: cover; }
.input-component { border: 1px solid #ccc; padding: 8px; font: inherit; }
.input-component:focus { outline: none; border-color: #4f46e5; }
.divider-component { border: none; border-top: 1px solid #e5e7eb; }
.group-component { pointer-events: none; }
[data-link] { cursor: pointer; }
.reveal { animation-play-state: paused; }
.reveal.is-visible { animation-play-state: running; }
";

/// Navigation on `data-link` plus scroll reveal for animated components.
pub const SCRIPT_JS: &str = "\
document.addEventListener('DOMContentLoaded', function () {
  document.querySelectorAll('[data-link]').forEach(function (el) {
    el.addEventListener('click', function (event) {
      event.preventDefault();
      window.location.href = el.getAttribute('data-link');
    });
  });

  var reveal = document.querySelectorAll('.reveal');
  if (!('IntersectionObserver' in window)) {
    reveal.forEach(function (el) { el.classList.add('is-visible'); });
    return;
  }
  var observer = new IntersectionObserver(function (entries) {
    entries.forEach(function (entry) {
      if (entry.isIntersecting) {
        entry.target.classList.add('is-visible');
        observer.unobserve(entry.target);
      }
    });
  }, { threshold: 0.1 });
  reveal.forEach(function (el) { observer.observe(el); });
});
";

/// Keyframe bodies of the named animation library.
const KEYFRAMES: &[(&str, &str)] = &[
    ("fade-in", "from { opacity: 0; } to { opacity: 1; }"),
    (
        "fade-in-up",
        "from { opacity: 0; transform: translate3d(0, 40px, 0); } to { opacity: 1; transform: none; }",
    ),
    (
        "fade-in-down",
        "from { opacity: 0; transform: translate3d(0, -40px, 0); } to { opacity: 1; transform: none; }",
    ),
    (
        "fade-in-left",
        "from { opacity: 0; transform: translate3d(-40px, 0, 0); } to { opacity: 1; transform: none; }",
    ),
    (
        "fade-in-right",
        "from { opacity: 0; transform: translate3d(40px, 0, 0); } to { opacity: 1; transform: none; }",
    ),
    (
        "zoom-in",
        "from { opacity: 0; transform: scale3d(0.5, 0.5, 0.5); } to { opacity: 1; transform: none; }",
    ),
    (
        "zoom-out",
        "from { opacity: 0; transform: scale3d(1.5, 1.5, 1.5); } to { opacity: 1; transform: none; }",
    ),
    (
        "slide-in-up",
        "from { transform: translate3d(0, 100%, 0); visibility: visible; } to { transform: translate3d(0, 0, 0); }",
    ),
    (
        "slide-in-down",
        "from { transform: translate3d(0, -100%, 0); visibility: visible; } to { transform: translate3d(0, 0, 0); }",
    ),
    (
        "slide-in-left",
        "from { transform: translate3d(-100%, 0, 0); visibility: visible; } to { transform: translate3d(0, 0, 0); }",
    ),
    (
        "slide-in-right",
        "from { transform: translate3d(100%, 0, 0); visibility: visible; } to { transform: translate3d(0, 0, 0); }",
    ),
    (
        "bounce",
        "0%, 20%, 53%, 100% { transform: translate3d(0, 0, 0); } \
         40%, 43% { transform: translate3d(0, -30px, 0); } \
         70% { transform: translate3d(0, -15px, 0); } \
         90% { transform: translate3d(0, -4px, 0); }",
    ),
    (
        "bounce-in",
        "0% { opacity: 0; transform: scale3d(0.3, 0.3, 0.3); } \
         20% { transform: scale3d(1.1, 1.1, 1.1); } \
         40% { transform: scale3d(0.9, 0.9, 0.9); } \
         60% { opacity: 1; transform: scale3d(1.03, 1.03, 1.03); } \
         80% { transform: scale3d(0.97, 0.97, 0.97); } \
         100% { opacity: 1; transform: scale3d(1, 1, 1); }",
    ),
    (
        "rotate-in",
        "from { opacity: 0; transform: rotate(-200deg); } to { opacity: 1; transform: none; }",
    ),
    (
        "rotate-in-down-left",
        "from { opacity: 0; transform-origin: left bottom; transform: rotate(-45deg); } \
         to { opacity: 1; transform-origin: left bottom; transform: none; }",
    ),
    (
        "rotate-in-down-right",
        "from { opacity: 0; transform-origin: right bottom; transform: rotate(45deg); } \
         to { opacity: 1; transform-origin: right bottom; transform: none; }",
    ),
    (
        "flip-in-x",
        "from { opacity: 0; transform: perspective(400px) rotateX(90deg); } \
         40% { transform: perspective(400px) rotateX(-20deg); } \
         60% { opacity: 1; transform: perspective(400px) rotateX(10deg); } \
         80% { transform: perspective(400px) rotateX(-5deg); } \
         to { transform: perspective(400px); }",
    ),
    (
        "flip-in-y",
        "from { opacity: 0; transform: perspective(400px) rotateY(90deg); } \
         40% { transform: perspective(400px) rotateY(-20deg); } \
         60% { opacity: 1; transform: perspective(400px) rotateY(10deg); } \
         80% { transform: perspective(400px) rotateY(-5deg); } \
         to { transform: perspective(400px); }",
    ),
    (
        "pulse",
        "from { transform: scale3d(1, 1, 1); } 50% { transform: scale3d(1.05, 1.05, 1.05); } \
         to { transform: scale3d(1, 1, 1); }",
    ),
    (
        "shake",
        "from, to { transform: translate3d(0, 0, 0); } \
         10%, 30%, 50%, 70%, 90% { transform: translate3d(-10px, 0, 0); } \
         20%, 40%, 60%, 80% { transform: translate3d(10px, 0, 0); }",
    ),
    (
        "swing",
        "20% { transform: rotate3d(0, 0, 1, 15deg); } 40% { transform: rotate3d(0, 0, 1, -10deg); } \
         60% { transform: rotate3d(0, 0, 1, 5deg); } 80% { transform: rotate3d(0, 0, 1, -5deg); } \
         to { transform: rotate3d(0, 0, 1, 0deg); }",
    ),
    (
        "tada",
        "from { transform: scale3d(1, 1, 1); } \
         10%, 20% { transform: scale3d(0.9, 0.9, 0.9) rotate3d(0, 0, 1, -3deg); } \
         30%, 50%, 70%, 90% { transform: scale3d(1.1, 1.1, 1.1) rotate3d(0, 0, 1, 3deg); } \
         40%, 60%, 80% { transform: scale3d(1.1, 1.1, 1.1) rotate3d(0, 0, 1, -3deg); } \
         to { transform: scale3d(1, 1, 1); }",
    ),
    (
        "wobble",
        "from { transform: translate3d(0, 0, 0); } \
         15% { transform: translate3d(-25%, 0, 0) rotate3d(0, 0, 1, -5deg); } \
         30% { transform: translate3d(20%, 0, 0) rotate3d(0, 0, 1, 3deg); } \
         45% { transform: translate3d(-15%, 0, 0) rotate3d(0, 0, 1, -3deg); } \
         60% { transform: translate3d(10%, 0, 0) rotate3d(0, 0, 1, 2deg); } \
         75% { transform: translate3d(-5%, 0, 0) rotate3d(0, 0, 1, -1deg); } \
         to { transform: translate3d(0, 0, 0); }",
    ),
    (
        "jello",
        "from, 11.1%, to { transform: translate3d(0, 0, 0); } \
         22.2% { transform: skewX(-12.5deg) skewY(-12.5deg); } \
         33.3% { transform: skewX(6.25deg) skewY(6.25deg); } \
         44.4% { transform: skewX(-3.125deg) skewY(-3.125deg); } \
         55.5% { transform: skewX(1.5625deg) skewY(1.5625deg); } \
         66.6% { transform: skewX(-0.78125deg) skewY(-0.78125deg); } \
         77.7% { transform: skewX(0.390625deg) skewY(0.390625deg); } \
         88.8% { transform: skewX(-0.1953125deg) skewY(-0.1953125deg); }",
    ),
];

/// Names of every animation in the library.
pub fn animation_names() -> impl Iterator<Item = &'static str> {
    KEYFRAMES.iter().map(|(name, _)| *name)
}

/// Whether `name` has keyframes in the library.
#[must_use]
pub fn is_known_animation(name: &str) -> bool {
    KEYFRAMES.iter().any(|(known, _)| *known == name)
}

/// `@keyframes` rules and `.animate-*` classes for the whole library.
#[must_use]
pub fn keyframes_css() -> String {
    let mut css = String::new();
    for (name, body) in KEYFRAMES {
        let _ = writeln!(css, "@keyframes {name} {{ {body} }}");
        let _ = writeln!(
            css,
            ".animate-{name} {{ animation-name: {name}; animation-fill-mode: both; }}"
        );
    }
    css
}

/// Full stylesheet: resets, component classes and the keyframe library.
#[must_use]
pub fn stylesheet() -> String {
    let mut css = String::from(BASE_CSS);
    css.push('\n');
    css.push_str(&keyframes_css());
    css
}

/// README shipped with the multi-file package.
#[must_use]
pub fn readme(title: &str, pages: &[Page], files: &[String]) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {title}\n");
    let _ = writeln!(
        md,
        "Static website exported from Sitecraft. Open `index.html` in a browser \
         or upload the folder to any static host.\n"
    );
    let _ = writeln!(md, "## Pages\n");
    for (page, file) in pages.iter().zip(files) {
        let _ = writeln!(md, "- **{}** - `{file}`", page.name);
    }
    let _ = writeln!(md, "\n## Files\n");
    let _ = writeln!(md, "- `styles.css` - layout resets, component classes and animations");
    let _ = writeln!(md, "- `script.js` - page links and scroll-triggered animations");
    md
}
