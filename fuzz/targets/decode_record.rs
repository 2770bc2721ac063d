#![no_main]

use libfuzzer_sys::fuzz_target;
use zarchive::{demo::DemoRecord, serialize_from_bytes, serialize_to_bytes};

fuzz_target!(|data: &[u8]| {
    // Под Strict любые байты дают Ok или Err, но не панику.
    let mut record = DemoRecord::default();
    if serialize_from_bytes(&mut record, data).is_err() {
        return;
    }

    // Успешно прочитанная запись переживает повторный цикл записи и чтения.
    let bytes = match serialize_to_bytes(&mut record.clone()) {
        Ok(bytes) => bytes,
        Err(e) => panic!("re-encoding a decoded record failed: {e}"),
    };
    let mut again = DemoRecord::default();
    if let Err(e) = serialize_from_bytes(&mut again, &bytes) {
        panic!("decoding re-encoded record failed: {e}");
    }
    assert_eq!(again, record);
});
