mod diagnostics;
mod entropy_quality;
mod masking;
