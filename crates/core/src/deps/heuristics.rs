use regex::Regex;
use std::sync::LazyLock;

/// A usage pattern and the packages it implies.
struct Heuristic {
    pattern: &'static str,
    packages: &'static [(&'static str, &'static str)],
    /// Also applied to stylesheets.
    stylesheets: bool,
}

const HEURISTICS: &[Heuristic] = &[
    // Tailwind utility classes, directives or imports
    Heuristic {
        pattern: r#"@tailwind\b|\btailwindcss\b|\bclass(?:Name)?\s*=\s*\{?\s*["'`][^"'`]*?\b(?:flex|grid|[pm][xytblr]?-\d+|text-(?:xs|sm|base|lg|[2-9]?xl)|bg-[a-z]+-\d{2,3}|rounded(?:-[a-z0-9]+)?|shadow(?:-[a-z]+)?)\b"#,
        packages: &[
            ("tailwindcss", "^3.3.0"),
            ("postcss", "^8.4.31"),
            ("autoprefixer", "^10.4.16"),
        ],
        stylesheets: true,
    },
    // Client routing
    Heuristic {
        pattern: r"\b(?:useNavigate|useParams|useLocation|useSearchParams|BrowserRouter|HashRouter)\b|<(?:Route|Routes|Link|NavLink)\b",
        packages: &[("react-router-dom", "^6.20.0")],
        stylesheets: false,
    },
    // Form management
    Heuristic {
        pattern: r"\b(?:useForm|useController|useFieldArray|useFormContext)\b|<Controller\b",
        packages: &[("react-hook-form", "^7.48.0")],
        stylesheets: false,
    },
    // Centralized state
    Heuristic {
        pattern: r"\b(?:useDispatch|useSelector|createSlice|configureStore)\b|<Provider\s+store\b",
        packages: &[("@reduxjs/toolkit", "^1.9.7"), ("react-redux", "^8.1.3")],
        stylesheets: false,
    },
    // Icon components
    Heuristic {
        pattern: r"<(?:Fa|Md|Io|Hi|Ai|Bi|Bs|Fi)[A-Z]\w*",
        packages: &[("react-icons", "^4.12.0")],
        stylesheets: false,
    },
    // Animation
    Heuristic {
        pattern: r"\b(?:useAnimation|useSpring|useMotionValue|AnimatePresence)\b|<motion\.\w+",
        packages: &[("framer-motion", "^10.16.0")],
        stylesheets: false,
    },
    // Date formatting
    Heuristic {
        pattern: r"\b(?:formatDistance(?:ToNow)?|formatRelative|parseISO|differenceIn[A-Z]\w*|addDays|subDays)\b|\bformat\(\s*new Date\b",
        packages: &[("date-fns", "^2.30.0")],
        stylesheets: false,
    },
];

static COMPILED: LazyLock<Vec<(Regex, &'static Heuristic)>> = LazyLock::new(|| {
    HEURISTICS
        .iter()
        .map(|heuristic| {
            (
                Regex::new(heuristic.pattern).expect("valid heuristic regex"),
                heuristic,
            )
        })
        .collect()
});

/// Packages implied by usage patterns in `content`.
///
/// Every matching heuristic contributes; `stylesheet` restricts the check to
/// the heuristics that apply to CSS.
pub fn detect_packages(content: &str, stylesheet: bool) -> Vec<(&'static str, &'static str)> {
    COMPILED
        .iter()
        .filter(|(_, heuristic)| !stylesheet || heuristic.stylesheets)
        .filter(|(regex, _)| regex.is_match(content))
        .flat_map(|(_, heuristic)| heuristic.packages.iter().copied())
        .collect()
}
