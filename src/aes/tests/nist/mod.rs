mod test_nist_aes_core;
