//! Small helper macros shared across `mynes-common`.

/// Build a niladic function named `$key` that returns the active
/// `cfg($key = "...")` value among the given candidates as a `&'static str`.
///
/// Used by `env::os`/`env::arch` to turn a list of `cfg` candidates into a
/// single runtime-readable string without hand-writing one `cfg` arm per
/// platform at the call site.
macro_rules! get_cfg {
	($key:ident : $($val:literal),+ $(,)?) => {
		fn $key() -> &'static str {
			$(
				#[cfg($key = $val)]
				{
					return $val;
				}
			)+
			#[allow(unreachable_code)]
			{
				"unknown"
			}
		}
	};
}
