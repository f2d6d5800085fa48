pub mod classifier;
pub mod external;
pub mod manual;
pub mod normalizer;

pub use classifier::{DEFAULT_ESTIMATE, NutritionEstimate, estimate_nutrition};
pub use external::{
    MenuExtractor, ParseOutcome, ParserKind, SavedResponseExtractor, build_extraction_prompt,
    decode_extraction_response, parse_menu,
};
pub use manual::{ManualNutrition, manual_item};
pub use normalizer::{clean_line, normalize_menu};
