#![no_main]
use libfuzzer_sys::fuzz_target;

use xtemplate::XTemplate;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(mut xt) = XTemplate::new(s) {
            let names: Vec<String> = xt.template().block_names().into_iter().map(String::from).collect();
            for name in names.iter().rev() {
                let _ = xt.parse(name);
            }
            let _ = xt.render();
        }
    }
});
